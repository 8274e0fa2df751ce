//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! serialised shape so the generated document stays accurate while the
//! domain module stays free of framework attributes.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Display name.
    #[schema(example = "Ann")]
    name: String,
    /// Unique email address.
    #[schema(example = "ann@x.com")]
    email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::{PartialSchema, ToSchema};

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn user_schema_is_published_as_user() {
        assert_eq!(UserSchema::name(), "User");
    }

    #[test]
    fn user_schema_lists_serialised_fields() {
        let schema_json = schema_to_json::<UserSchema>();
        for field in ["\"id\"", "\"name\"", "\"email\""] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
