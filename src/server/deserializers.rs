use serde::{Deserialize, Deserializer};

// clients send "" when the search box is left empty, treat it as no search at all
pub fn deserialize_search_term<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|term| !term.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_search_term")]
        term: Option<String>,
    }

    #[test]
    fn empty_and_missing_terms_are_absent() {
        let empty: Body = serde_json::from_str(r#"{"term": ""}"#).unwrap();
        let null: Body = serde_json::from_str(r#"{"term": null}"#).unwrap();
        let missing: Body = serde_json::from_str("{}").unwrap();
        let given: Body = serde_json::from_str(r#"{"term": "title"}"#).unwrap();

        assert_eq!(empty.term, None);
        assert_eq!(null.term, None);
        assert_eq!(missing.term, None);
        assert_eq!(given.term.as_deref(), Some("title"));
    }
}
