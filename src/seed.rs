use crate::{
    models::{NewUser, Role, User},
    repository::{Repository, RepositoryError},
};

/// The demo accounts created by [`seed_demo_users`]: (name, email, role).
pub const DEMO_USERS: [(&str, &str, Role); 2] = [
    ("Admin User", "admin@example.com", Role::Administrator),
    ("Student User", "student@example.com", Role::Student),
];

/// seed_demo_users
///
/// Creates one administrator and one student. Safe to run on every startup since
/// `create_user` is idempotent on email.
pub async fn seed_demo_users(repo: &dyn Repository) -> Result<Vec<User>, RepositoryError> {
    let mut seeded = Vec::with_capacity(DEMO_USERS.len());
    for (name, email, role) in DEMO_USERS {
        let user = repo
            .create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                role,
            })
            .await?;
        tracing::info!(user_id = %user.id, email = %user.email, role = %role, "Seeded demo user");
        seeded.push(user);
    }
    Ok(seeded)
}
