//! User Service - Business logic layer

use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_orders::OrderRepository;
use domain_products::ProductRepository;

use crate::error::{UserError, UserResult};
use crate::models::{
    LoginRequest, PurchasedProduct, SignupRequest, UpdateProfile, User, UserResponse,
};
use crate::repository::UserRepository;

/// Bcrypt work factor used for password hashing.
const BCRYPT_COST: u32 = 10;

/// Service layer for account and profile business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account.
    ///
    /// The existence check and the insert are two separate round-trips;
    /// concurrent signups with the same email can both pass the check.
    /// A unique index on `email` closes that window at the store layer.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.name, input.email, password_hash);

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Verify credentials and return the account.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller, to avoid account enumeration.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }

    /// Resolve a user by ID (used by the auth middleware)
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Merge profile fields into the user record
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.apply_profile_update(update);

        let updated = self
            .repository
            .update(user)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(updated.into())
    }

    /// Replace the profile picture reference
    #[instrument(skip(self, profile_picture))]
    pub async fn update_profile_picture(
        &self,
        id: Uuid,
        profile_picture: String,
    ) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.profile_picture = Some(profile_picture);
        user.updated_at = chrono::Utc::now();

        let updated = self
            .repository
            .update(user)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(updated.into())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Order aggregates computed for the profile endpoint
#[derive(Debug)]
pub struct ProfileAggregates {
    pub order_count: usize,
    pub total_spent: f64,
    pub purchased_products: Vec<PurchasedProduct>,
}

/// Aggregation over the order collection for the profile endpoint.
///
/// The baseline behavior scans every order in the store, not just the
/// requesting user's; `scope_user_orders` restricts the scan to orders
/// carrying the user's id.
pub struct ProfileService<O: OrderRepository, P: ProductRepository> {
    orders: Arc<O>,
    products: Arc<P>,
    scope_user_orders: bool,
}

impl<O: OrderRepository, P: ProductRepository> ProfileService<O, P> {
    pub fn new(orders: O, products: P, scope_user_orders: bool) -> Self {
        Self {
            orders: Arc::new(orders),
            products: Arc::new(products),
            scope_user_orders,
        }
    }

    /// Compute order count, total spent, and the distinct purchased
    /// products. The first order to reference a product supplies its
    /// display snapshot; line items whose product no longer resolves
    /// are skipped.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, user_id: Uuid) -> UserResult<ProfileAggregates> {
        let orders = if self.scope_user_orders {
            self.orders.find_by_user(user_id).await?
        } else {
            self.orders.find_all().await?
        };

        let order_count = orders.len();
        let total_spent = orders.iter().map(|o| o.total).sum();

        let mut purchased_products = Vec::new();
        let mut seen: HashSet<Uuid> = HashSet::new();

        for order in &orders {
            for item in &order.items {
                if seen.contains(&item.product_id) {
                    continue;
                }
                if let Some(product) = self.products.get_by_id(item.product_id).await? {
                    seen.insert(product.id);
                    purchased_products.push(PurchasedProduct {
                        id: product.id,
                        name: product.name,
                        price: product.price,
                        image: product.image,
                    });
                }
            }
        }

        Ok(ProfileAggregates {
            order_count,
            total_spent,
            purchased_products,
        })
    }
}

impl<O: OrderRepository, P: ProductRepository> Clone for ProfileService<O, P> {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            products: Arc::clone(&self.products),
            scope_user_orders: self.scope_user_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use domain_orders::{InMemoryOrderRepository, Order, OrderItem};
    use domain_products::{CreateProduct, InMemoryProductRepository};

    fn signup_input(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn signup_rejects_empty_fields_without_touching_the_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().never();
        repo.expect_create().never();
        let service = UserService::new(repo);

        for input in [
            signup_input("", "jane@example.com", "secret"),
            signup_input("Jane", "", "secret"),
            signup_input("Jane", "jane@example.com", ""),
        ] {
            let result = service.signup(input).await;
            assert!(matches!(result, Err(UserError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn second_signup_with_same_email_conflicts() {
        let service = UserService::new(InMemoryUserRepository::new());

        service
            .signup(signup_input("Jane", "jane@example.com", "secret"))
            .await
            .unwrap();

        let result = service
            .signup(signup_input("Janet", "jane@example.com", "other"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn login_round_trips_through_the_hash() {
        let service = UserService::new(InMemoryUserRepository::new());
        let created = service
            .signup(signup_input("Jane", "jane@example.com", "secret"))
            .await
            .unwrap();

        let user = service
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let service = UserService::new(InMemoryUserRepository::new());
        service
            .signup(signup_input("Jane", "jane@example.com", "secret"))
            .await
            .unwrap();

        let wrong_password = service
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await;
        let unknown_email = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());
        let created = service
            .signup(signup_input("Jane", "jane@example.com", "secret"))
            .await
            .unwrap();

        let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret");
        assert!(stored.password_hash.starts_with("$2"));
    }

    async fn seeded_products(repo: &InMemoryProductRepository, names: &[&str]) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for name in names {
            let product = repo
                .create(CreateProduct {
                    name: name.to_string(),
                    price: 10.0,
                    image: format!("https://example.com/{name}.jpg"),
                    description: "desc".to_string(),
                    category: "General".to_string(),
                })
                .await
                .unwrap();
            ids.push(product.id);
        }
        ids
    }

    #[tokio::test]
    async fn aggregation_counts_totals_and_dedups_products() {
        let orders = InMemoryOrderRepository::new();
        let products = InMemoryProductRepository::new();
        let ids = seeded_products(&products, &["Watch", "Lamp"]).await;

        orders
            .insert(Order::new(
                None,
                10.0,
                vec![OrderItem {
                    product_id: ids[0],
                    quantity: 1,
                }],
            ))
            .await;
        orders
            .insert(Order::new(
                None,
                20.0,
                vec![
                    OrderItem {
                        product_id: ids[0],
                        quantity: 2,
                    },
                    OrderItem {
                        product_id: ids[1],
                        quantity: 1,
                    },
                ],
            ))
            .await;
        orders.insert(Order::new(None, 30.0, vec![])).await;

        let service = ProfileService::new(orders, products, false);
        let aggregates = service.aggregate(Uuid::now_v7()).await.unwrap();

        assert_eq!(aggregates.order_count, 3);
        assert_eq!(aggregates.total_spent, 60.0);
        assert_eq!(aggregates.purchased_products.len(), 2);
        assert_eq!(aggregates.purchased_products[0].name, "Watch");
    }

    #[tokio::test]
    async fn aggregation_skips_unresolvable_products() {
        let orders = InMemoryOrderRepository::new();
        let products = InMemoryProductRepository::new();
        let ids = seeded_products(&products, &["Watch"]).await;

        orders
            .insert(Order::new(
                None,
                15.0,
                vec![
                    OrderItem {
                        product_id: ids[0],
                        quantity: 1,
                    },
                    OrderItem {
                        product_id: Uuid::now_v7(), // deleted product
                        quantity: 1,
                    },
                ],
            ))
            .await;

        let service = ProfileService::new(orders, products, false);
        let aggregates = service.aggregate(Uuid::now_v7()).await.unwrap();

        assert_eq!(aggregates.order_count, 1);
        assert_eq!(aggregates.purchased_products.len(), 1);
    }

    #[tokio::test]
    async fn unscoped_aggregation_sees_every_users_orders() {
        let orders = InMemoryOrderRepository::new();
        let products = InMemoryProductRepository::new();
        let me = Uuid::now_v7();
        let someone_else = Uuid::now_v7();

        orders.insert(Order::new(Some(me), 10.0, vec![])).await;
        orders
            .insert(Order::new(Some(someone_else), 20.0, vec![]))
            .await;

        let service = ProfileService::new(orders, products, false);
        let aggregates = service.aggregate(me).await.unwrap();

        assert_eq!(aggregates.order_count, 2);
        assert_eq!(aggregates.total_spent, 30.0);
    }

    #[tokio::test]
    async fn scoped_aggregation_sees_only_the_users_orders() {
        let orders = InMemoryOrderRepository::new();
        let products = InMemoryProductRepository::new();
        let me = Uuid::now_v7();
        let someone_else = Uuid::now_v7();

        orders.insert(Order::new(Some(me), 10.0, vec![])).await;
        orders
            .insert(Order::new(Some(someone_else), 20.0, vec![]))
            .await;

        let service = ProfileService::new(orders, products, true);
        let aggregates = service.aggregate(me).await.unwrap();

        assert_eq!(aggregates.order_count, 1);
        assert_eq!(aggregates.total_spent, 10.0);
    }

    #[tokio::test]
    async fn update_profile_on_missing_user_is_not_found() {
        let service = UserService::new(InMemoryUserRepository::new());

        let result = service
            .update_profile(Uuid::now_v7(), UpdateProfile::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
