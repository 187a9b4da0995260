// Collection query parameters: filtering, sorting and pagination.
//
// Filters are encoded the way the API expects them on the query string:
// `name=foo` for equality, `name:lk=foo*` for every other operator.

use std::fmt;
use std::str::FromStr;

/// Comparison operator of a collection filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Eq,
    Neq,
    Lk,
    Nlk,
    Gt,
    Lt,
    In,
    Nin,
}

/// A single `property:operator=value[,value...]` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub property: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl Filter {
    /// Equality filter on a single value.
    pub fn equals(property: impl Into<String>, value: impl ToString) -> Self {
        Self {
            property: property.into(),
            operator: FilterOperator::Eq,
            values: vec![value.to_string()],
        }
    }

    fn query_pair(&self) -> (String, String) {
        let key = match self.operator {
            FilterOperator::Eq => self.property.clone(),
            op => format!("{}:{op}", self.property),
        };
        (key, self.values.join(","))
    }
}

/// Sort direction for `sort=property:direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.property, self.direction)
    }
}

impl FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(':') {
            Some((p, d)) => (
                p,
                d.parse::<SortDirection>()
                    .map_err(|_| format!("invalid sort direction '{d}', expected asc or desc"))?,
            ),
            None => (s, SortDirection::Asc),
        };
        if property.is_empty() {
            return Err("sort property must not be empty".into());
        }
        Ok(Self {
            property: property.to_owned(),
            direction,
        })
    }
}

/// Parameters for every collection endpoint.
///
/// `page: None` means "fetch every page"; `Some(n)` fetches exactly page `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Encode as query string pairs for the given page.
    pub fn query_pairs(&self, page: u32) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> =
            self.filters.iter().map(Filter::query_pair).collect();
        if let Some(ref sort) = self.sort {
            pairs.push(("sort".into(), sort.to_string()));
        }
        pairs.push(("page".into(), page.to_string()));
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".into(), per_page.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn equality_filter_has_bare_property_key() {
        let params = ListParams::default().with_filter(Filter::equals("name", "web"));
        assert_eq!(
            params.query_pairs(1),
            vec![
                ("name".to_string(), "web".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn operator_filter_and_sort_are_encoded() {
        let params = ListParams {
            filters: vec![Filter {
                property: "id".into(),
                operator: FilterOperator::In,
                values: vec!["1".into(), "2".into()],
            }],
            sort: Some("name:desc".parse().unwrap()),
            page: None,
            per_page: Some(50),
        };
        assert_eq!(
            params.query_pairs(3),
            vec![
                ("id:in".to_string(), "1,2".to_string()),
                ("sort".to_string(), "name:desc".to_string()),
                ("page".to_string(), "3".to_string()),
                ("per_page".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn sort_defaults_to_ascending() {
        let sort: Sort = "created_at".parse().unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);
        assert!("name:sideways".parse::<Sort>().is_err());
        assert!(":asc".parse::<Sort>().is_err());
    }
}
