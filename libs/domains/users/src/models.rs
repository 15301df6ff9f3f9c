use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity - an identity record stored in MongoDB
///
/// Serializes in full for persistence; API responses go through
/// [`UserResponse`], which never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email (unique, compared as stored)
    pub email: String,
    /// Bcrypt password hash
    pub password_hash: String,
    /// Phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Profile picture reference (URL or data URI)
    pub profile_picture: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (password must already be hashed)
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            phone: None,
            address: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a profile update into the record.
    ///
    /// Empty-string name and address are ignored; phone is applied
    /// whenever the key was present, including an empty string.
    pub fn apply_profile_update(&mut self, update: UpdateProfile) {
        if let Some(name) = update.name {
            if !name.is_empty() {
                self.name = name;
            }
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            if !address.is_empty() {
                self.address = Some(address);
            }
        }
        self.updated_at = Utc::now();
    }
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for account signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for profile updates; absent keys leave the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// DTO for profile picture updates
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePicture {
    pub profile_picture: Option<String>,
}

/// Response after successful signup/login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Stateless session token, valid for 7 days
    pub token: String,
}

/// Envelope for profile update responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// A distinct purchased product, snapshotted from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchasedProduct {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub image: String,
}

/// Response for the profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub order_count: usize,
    pub total_spent: f64,
    pub purchased_products: Vec<PurchasedProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let mut u = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        u.phone = Some("555-0100".to_string());
        u.address = Some("1 Main St".to_string());
        u
    }

    #[test]
    fn empty_name_is_ignored_on_merge() {
        let mut u = user();
        u.apply_profile_update(UpdateProfile {
            name: Some(String::new()),
            phone: None,
            address: None,
        });
        assert_eq!(u.name, "Jane");
    }

    #[test]
    fn empty_phone_is_applied_on_merge() {
        let mut u = user();
        u.apply_profile_update(UpdateProfile {
            name: None,
            phone: Some(String::new()),
            address: None,
        });
        assert_eq!(u.phone.as_deref(), Some(""));
        assert_eq!(u.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn absent_keys_leave_fields_untouched() {
        let mut u = user();
        u.apply_profile_update(UpdateProfile {
            name: Some("Janet".to_string()),
            phone: None,
            address: None,
        });
        assert_eq!(u.name, "Janet");
        assert_eq!(u.phone.as_deref(), Some("555-0100"));
        assert_eq!(u.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn response_never_carries_the_password_hash() {
        let response: UserResponse = user().into();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }
}
