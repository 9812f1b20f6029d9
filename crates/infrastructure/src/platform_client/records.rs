use serde_json::{Map, Value, json};
use tracing::warn;
use ventureos_application::{AssignRoleInput, CreateRoleInput, UpdateRoleInput};
use ventureos_core::{AppError, AppResult, Identity, PlatformRole};
use ventureos_domain::{AssignmentScope, RoleAssignment, RoleDefinition, RolePermissions};

/// Reads a string field, accepting numbers as well.
fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(value) if !value.trim().is_empty() => Some(value.trim().to_owned()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

pub(super) fn decode_records(value: Value, entity: &str) -> AppResult<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Null => Ok(Vec::new()),
        _ => Err(AppError::Internal(format!(
            "platform returned a non-array listing for {entity}"
        ))),
    }
}

pub(super) fn decode_role(value: &Value) -> Option<RoleDefinition> {
    let record = value.as_object()?;
    let role_id = string_field(record, "id")?;
    let name = string_field(record, "name").unwrap_or_else(|| role_id.clone());

    Some(RoleDefinition {
        role_id,
        name,
        description: string_field(record, "description"),
        permissions: RolePermissions::from_json(record.get("permissions").unwrap_or(&Value::Null)),
    })
}

pub(super) fn decode_assignment(value: &Value) -> Option<RoleAssignment> {
    let record = value.as_object()?;
    let scope = record
        .get("scope")
        .and_then(Value::as_str)
        .map_or(AssignmentScope::ResourceSpecific, AssignmentScope::from_transport);
    let resource_ids = record
        .get("resource_ids")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| match value {
                    Value::String(value) => Some(value.clone()),
                    Value::Number(value) => Some(value.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Some(RoleAssignment {
        assignment_id: string_field(record, "id")?,
        user_email: string_field(record, "user_email")?.to_lowercase(),
        role_id: string_field(record, "role_id")?,
        scope,
        resource_ids,
        assigned_at: string_field(record, "created_date"),
    })
}

/// Decodes every record, skipping the malformed ones.
pub(super) fn decode_all<T>(
    records: Vec<Value>,
    entity: &str,
    decode: fn(&Value) -> Option<T>,
) -> Vec<T> {
    let mut decoded = Vec::with_capacity(records.len());
    for record in records {
        match decode(&record) {
            Some(value) => decoded.push(value),
            None => {
                let record_id = record.get("id").cloned().unwrap_or(Value::Null);
                warn!(entity, record_id = %record_id, "skipping malformed platform record");
            }
        }
    }

    decoded
}

pub(super) fn decode_identity(value: &Value) -> AppResult<Identity> {
    let record = value.as_object().ok_or_else(|| {
        AppError::Unauthorized("platform returned no user for the access token".to_owned())
    })?;
    let email = string_field(record, "email").ok_or_else(|| {
        AppError::Unauthorized("platform user has no email address".to_owned())
    })?;
    let platform_role = record
        .get("role")
        .and_then(Value::as_str)
        .map_or(PlatformRole::User, PlatformRole::from_transport);

    Ok(Identity::new(
        email,
        string_field(record, "full_name"),
        platform_role,
    ))
}

pub(super) fn create_role_body(input: &CreateRoleInput) -> Value {
    json!({
        "name": input.name,
        "description": input.description,
        "permissions": input.permissions,
    })
}

pub(super) fn update_role_body(input: &UpdateRoleInput) -> Value {
    json!({
        "name": input.name,
        "description": input.description,
        "permissions": input.permissions,
    })
}

pub(super) fn assignment_body(input: &AssignRoleInput) -> Value {
    json!({
        "user_email": input.user_email,
        "role_id": input.role_id,
        "scope": input.scope.as_str(),
        "resource_ids": input.resource_ids,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use ventureos_application::AssignRoleInput;
    use ventureos_core::{AppError, PlatformRole};
    use ventureos_domain::{AssignmentScope, RolePermissions};

    use super::{
        assignment_body, decode_all, decode_assignment, decode_identity, decode_records,
        decode_role,
    };

    #[test]
    fn decodes_role_with_lenient_permissions() {
        let role = decode_role(&json!({
            "id": "r1",
            "name": "Partner",
            "permissions": { "ventures": { "view": true, "edit": "true" } }
        }));

        let role = role.unwrap_or_else(|| unreachable!());
        assert_eq!(role.name, "Partner");
        assert!(role.permissions.is_granted("ventures", "view"));
        assert!(!role.permissions.is_granted("ventures", "edit"));
    }

    #[test]
    fn role_without_permissions_grants_nothing() {
        let role = decode_role(&json!({ "id": 7 })).unwrap_or_else(|| unreachable!());
        assert_eq!(role.role_id, "7");
        assert_eq!(role.name, "7");
        assert_eq!(role.permissions, RolePermissions::new());
    }

    #[test]
    fn decodes_assignment_and_fails_closed_on_scope() {
        let assignment = decode_assignment(&json!({
            "id": "a1",
            "user_email": "Ana@Studio.io",
            "role_id": "r1",
            "scope": "workspace",
            "resource_ids": ["v1", 2, null],
            "created_date": "2026-01-02T03:04:05Z"
        }))
        .unwrap_or_else(|| unreachable!());

        assert_eq!(assignment.user_email, "ana@studio.io");
        assert_eq!(assignment.scope, AssignmentScope::ResourceSpecific);
        assert_eq!(assignment.resource_ids, vec!["v1".to_owned(), "2".to_owned()]);
        assert_eq!(assignment.assigned_at.as_deref(), Some("2026-01-02T03:04:05Z"));
    }

    #[test]
    fn missing_scope_is_resource_specific() {
        let assignment = decode_assignment(&json!({
            "id": "a1", "user_email": "ana@studio.io", "role_id": "r1"
        }))
        .unwrap_or_else(|| unreachable!());
        assert_eq!(assignment.scope, AssignmentScope::ResourceSpecific);
        assert!(assignment.resource_ids.is_empty());
    }

    #[test]
    fn malformed_assignments_are_skipped() {
        let records = vec![
            json!({ "id": "a1", "user_email": "ana@studio.io", "role_id": "r1", "scope": "global" }),
            json!({ "id": "a2", "role_id": "r1" }),
            json!("not a record"),
        ];

        let decoded = decode_all(records, "RoleAssignment", decode_assignment);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].scope, AssignmentScope::Global);
    }

    #[test]
    fn listing_must_be_an_array() {
        assert!(decode_records(json!([]), "Role").is_ok_and(|records| records.is_empty()));
        assert!(decode_records(json!(null), "Role").is_ok());
        assert!(matches!(
            decode_records(json!({ "items": [] }), "Role"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn identity_requires_email() {
        let identity = decode_identity(&json!({
            "email": "Root@Studio.io", "full_name": "Root", "role": "admin"
        }));
        assert!(identity.is_ok_and(|identity| {
            identity.email() == "root@studio.io"
                && identity.platform_role() == PlatformRole::Admin
        }));

        assert!(matches!(
            decode_identity(&json!({ "full_name": "Nobody" })),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn assignment_body_uses_wire_scope() {
        let body = assignment_body(&AssignRoleInput {
            user_email: "ana@studio.io".to_owned(),
            role_id: "r1".to_owned(),
            scope: AssignmentScope::ResourceSpecific,
            resource_ids: vec!["v1".to_owned()],
        });
        assert_eq!(body["scope"], json!("resource_specific"));
        assert_eq!(body["resource_ids"], json!(["v1"]));
    }
}
