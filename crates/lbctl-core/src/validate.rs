// ── Flag value validation ──
//
// Closed-set values (balance algorithm, modes, monitor method...) and list
// query flags are checked here before any request is built.

use std::str::FromStr;

use lbctl_api::{Filter, FilterOperator, ListParams, Sort};
use strum::VariantNames;

use crate::error::CoreError;

/// Parse `value` as one of the closed set `T`, naming the flag and the
/// allowed values on failure.
pub fn parse_choice<T>(flag: &str, value: &str) -> Result<T, CoreError>
where
    T: FromStr + VariantNames,
{
    value.parse::<T>().map_err(|_| {
        CoreError::validation(
            flag,
            format!(
                "unsupported value '{value}', expected one of: {}",
                T::VARIANTS.join(", ")
            ),
        )
    })
}

/// Same as [`parse_choice`] for an optional flag.
pub fn parse_optional_choice<T>(flag: &str, value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr + VariantNames,
{
    value.map(|v| parse_choice(flag, v)).transpose()
}

/// Parse `property[:operator]=value[,value...]`.
pub fn parse_filter(raw: &str) -> Result<Filter, CoreError> {
    let Some((lhs, rhs)) = raw.split_once('=') else {
        return Err(CoreError::validation(
            "--filter",
            format!("'{raw}' must be in the form property[:operator]=value"),
        ));
    };

    let (property, operator) = match lhs.split_once(':') {
        Some((property, op)) => (property, parse_choice::<FilterOperator>("--filter", op)?),
        None => (lhs, FilterOperator::Eq),
    };
    if property.is_empty() {
        return Err(CoreError::validation(
            "--filter",
            format!("'{raw}' has an empty property"),
        ));
    }

    Ok(Filter {
        property: property.to_owned(),
        operator,
        values: rhs.split(',').map(str::to_owned).collect(),
    })
}

/// Build collection query parameters from the common list flags.
pub fn list_params(
    filters: &[String],
    sort: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<ListParams, CoreError> {
    let filters = filters
        .iter()
        .map(|f| parse_filter(f))
        .collect::<Result<Vec<_>, _>>()?;
    let sort = sort
        .map(Sort::from_str)
        .transpose()
        .map_err(|reason| CoreError::validation("--sort", reason))?;

    for (flag, value) in [("--page", page), ("--per-page", per_page)] {
        if value == Some(0) {
            return Err(CoreError::validation(flag, "must be at least 1"));
        }
    }

    Ok(ListParams {
        filters,
        sort,
        page,
        per_page,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lbctl_api::types::{MonitorMethod, TargetGroupBalance};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn choice_accepts_api_spelling() {
        let balance: TargetGroupBalance = parse_choice("--balance", "static-rr").unwrap();
        assert_eq!(balance, TargetGroupBalance::StaticRoundRobin);
    }

    #[test]
    fn choice_error_names_flag_value_and_set() {
        let err = parse_choice::<MonitorMethod>("--monitor-method", "FETCH").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--monitor-method"), "{msg}");
        assert!(msg.contains("'FETCH'"), "{msg}");
        assert!(msg.contains("GET, HEAD, OPTIONS"), "{msg}");
    }

    #[test]
    fn optional_choice_passes_through_none() {
        let none: Option<TargetGroupBalance> = parse_optional_choice("--balance", None).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn filter_with_and_without_operator() {
        let eq = parse_filter("name=web").unwrap();
        assert_eq!(eq, Filter::equals("name", "web"));

        let lk = parse_filter("name:lk=web*").unwrap();
        assert_eq!(lk.operator, FilterOperator::Lk);
        assert_eq!(lk.values, vec!["web*".to_string()]);

        let list = parse_filter("id:in=1,2,3").unwrap();
        assert_eq!(list.values.len(), 3);
    }

    #[test]
    fn malformed_filters_are_rejected() {
        assert!(parse_filter("name").is_err());
        assert!(parse_filter("=web").is_err());
        assert!(parse_filter("name:like=web").is_err());
    }

    #[test]
    fn list_params_rejects_zero_page() {
        assert!(list_params(&[], None, Some(0), None).is_err());
        let params = list_params(&["cluster_id=3".into()], Some("name:desc"), Some(2), None).unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.sort.unwrap().to_string(), "name:desc");
    }
}
