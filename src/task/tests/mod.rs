mod service_tests;

use crate::authorization::Role;
use crate::status::{StatusEntry, StatusKey, StatusRegistry};
use crate::user::domain::{EmailAddress, PasswordDigest, User};
use std::sync::OnceLock;

/// Registry numbering the catalog `"1"`..`"6"` under display names.
fn numbered_registry() -> StatusRegistry {
    StatusRegistry::new(
        StatusKey::ALL
            .into_iter()
            .zip(1..)
            .map(|(key, id)| StatusEntry::new(id.to_string(), key.name())),
    )
    .expect("catalog identifiers are unique")
}

fn user_with_roles(email: &str, roles: impl IntoIterator<Item = Role>) -> User {
    static DIGEST: OnceLock<PasswordDigest> = OnceLock::new();
    let digest = DIGEST
        .get_or_init(|| PasswordDigest::hash("123").expect("hash password"))
        .clone();
    User::new(
        email,
        EmailAddress::new(email).expect("valid email"),
        digest,
        roles,
    )
    .expect("valid user")
}
