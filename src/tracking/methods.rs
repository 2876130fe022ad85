//! Communication method management

use crate::error::{Error, Result};
use crate::store::Store;

use super::models::{CommunicationMethod, MethodInput};

/// Methods seeded into an empty collection on first start
pub fn default_methods() -> Vec<CommunicationMethod> {
    vec![
        CommunicationMethod::new("LinkedIn Post", "Post on LinkedIn", 1, true),
        CommunicationMethod::new("LinkedIn Message", "Send a LinkedIn message", 2, true),
        CommunicationMethod::new("Email", "Send an email", 3, true),
        CommunicationMethod::new("Phone Call", "Call the company", 4, false),
        CommunicationMethod::new("Other", "Any other communication method", 5, false),
    ]
}

/// Every field is required on both create and update
fn complete(input: MethodInput) -> Result<(String, String, i32, bool)> {
    match input {
        MethodInput {
            method_type: Some(method_type),
            description: Some(description),
            sequence: Some(sequence),
            mandatory: Some(mandatory),
        } if !method_type.trim().is_empty() && !description.trim().is_empty() => {
            Ok((method_type, description, sequence, mandatory))
        }
        _ => Err(Error::validation(
            "All fields (type, description, sequence, mandatory) are required.",
        )),
    }
}

pub async fn create_method(store: &dyn Store, input: MethodInput) -> Result<CommunicationMethod> {
    let (method_type, description, sequence, mandatory) = complete(input)?;
    let method = CommunicationMethod::new(&method_type, &description, sequence, mandatory);

    store.insert_methods(std::slice::from_ref(&method)).await?;
    tracing::info!("Created communication method {} ({})", method.method_type, method.id);
    Ok(method)
}

/// All methods ordered by sequence
pub async fn list_methods(store: &dyn Store) -> Result<Vec<CommunicationMethod>> {
    store.list_methods().await
}

pub async fn update_method(
    store: &dyn Store,
    id: &str,
    input: MethodInput,
) -> Result<CommunicationMethod> {
    let (method_type, description, sequence, mandatory) = complete(input)?;
    let method = CommunicationMethod {
        id: id.to_string(),
        method_type,
        description,
        sequence,
        mandatory,
    };

    if !store.update_method(&method).await? {
        return Err(Error::not_found("Communication method not found."));
    }
    Ok(method)
}

pub async fn delete_method(store: &dyn Store, id: &str) -> Result<()> {
    if !store.delete_method(id).await? {
        return Err(Error::not_found("Communication method not found."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn email_input(sequence: i32) -> MethodInput {
        MethodInput {
            method_type: Some("Email".to_string()),
            description: Some("Send an email".to_string()),
            sequence: Some(sequence),
            mandatory: Some(true),
        }
    }

    #[test]
    fn test_default_methods_are_ordered() {
        let methods = default_methods();
        assert_eq!(methods.len(), 5);
        assert!(methods.windows(2).all(|w| w[0].sequence < w[1].sequence));
        assert_eq!(methods.iter().filter(|m| m.mandatory).count(), 3);
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let store = MemoryStore::new();
        let mut input = email_input(3);
        input.mandatory = None;
        let err = create_method(&store, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_method() {
        let store = MemoryStore::new();
        let method = create_method(&store, email_input(3)).await.unwrap();

        let updated = update_method(&store, &method.id, email_input(1)).await.unwrap();
        assert_eq!(updated.id, method.id);
        assert_eq!(store.list_methods().await.unwrap()[0].sequence, 1);

        let err = update_method(&store, "missing", email_input(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_method() {
        let store = MemoryStore::new();
        let method = create_method(&store, email_input(3)).await.unwrap();
        delete_method(&store, &method.id).await.unwrap();
        assert!(store.list_methods().await.unwrap().is_empty());
        assert!(delete_method(&store, &method.id).await.is_err());
    }
}
