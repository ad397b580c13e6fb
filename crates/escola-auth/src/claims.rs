//! JWT claim structure for administrator tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in access tokens.
///
/// Only the administrator id travels in the token. The permission level is
/// re-read from the store on every guarded request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Administrator id
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The embedded id as a UUID, if it is one.
    pub fn admin_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.user_id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_user_id_key() {
        let claims = Claims {
            user_id: "abc".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""userId":"abc""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"userId":"{}","exp":9999999999,"iat":9999999900}}"#, id);
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.admin_id(), Some(id));
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_admin_id_rejects_garbage() {
        let claims = Claims {
            user_id: "not-a-uuid".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(claims.admin_id().is_none());
    }
}
