//! Picklist values served from a session file

use std::collections::HashMap;
use std::future::Future;

use soql_core::{FetchError, PicklistOption, PicklistSource};

/// Serves the `picklists` table of a session as if fetched remotely
#[derive(Debug, Clone, Default)]
pub struct SessionPicklistSource {
    picklists: HashMap<String, Vec<PicklistOption>>,
}

impl SessionPicklistSource {
    pub fn new(picklists: HashMap<String, Vec<PicklistOption>>) -> Self {
        Self { picklists }
    }
}

impl PicklistSource for SessionPicklistSource {
    fn picklist_values(
        &self,
        object_type: &str,
        field: &str,
    ) -> impl Future<Output = Result<Vec<PicklistOption>, FetchError>> + Send {
        let result = self.picklists.get(field).cloned().ok_or_else(|| {
            FetchError::new(format!("no picklist values for {}.{}", object_type, field))
        });
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SessionPicklistSource {
        SessionPicklistSource::new(HashMap::from([(
            "Industry".to_string(),
            vec![PicklistOption::new("Energy", "Energy")],
        )]))
    }

    #[test]
    fn test_known_field() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let values = rt.block_on(source().picklist_values("Account", "Industry"));
        assert_eq!(values.unwrap(), vec![PicklistOption::new("Energy", "Energy")]);
    }

    #[test]
    fn test_unknown_field() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let error = rt
            .block_on(source().picklist_values("Account", "Rating"))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Picklist fetch failed: no picklist values for Account.Rating"
        );
    }
}
