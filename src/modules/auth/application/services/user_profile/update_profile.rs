use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::{
    domain::entities::{ProfileChanges, UserView},
    ports::outgoing::{UserQuery, UserRepository, UserRepositoryError},
    use_cases::update_profile::{UpdateUserError, UpdateUserInput, UpdateUserProfileUseCase},
};

const MAX_FIELD_LEN: usize = 100;

fn is_valid_username(username: &str) -> bool {
    (3..=30).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub struct UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    user_query: Q,
    user_repository: R,
}

impl<Q, R> UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self {
            user_query: query,
            user_repository: repository,
        }
    }

    fn clean(field: &str, value: Option<String>) -> Result<Option<String>, UpdateUserError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UpdateUserError::InvalidInput(format!(
                "{field} cannot be blank"
            )));
        }
        if trimmed.chars().count() > MAX_FIELD_LEN {
            return Err(UpdateUserError::InvalidInput(format!(
                "{field} must be at most {MAX_FIELD_LEN} characters"
            )));
        }
        Ok(Some(trimmed.to_string()))
    }

    fn validate(changes: ProfileChanges) -> Result<ProfileChanges, UpdateUserError> {
        let username = Self::clean("username", changes.username)?;
        if let Some(username) = &username {
            if !is_valid_username(username) {
                return Err(UpdateUserError::InvalidInput(
                    "username must be 3-30 letters, digits or underscores".to_string(),
                ));
            }
        }

        if let Some(dob) = changes.date_of_birth {
            if dob >= Utc::now().date_naive() {
                return Err(UpdateUserError::InvalidInput(
                    "dateOfBirth must be in the past".to_string(),
                ));
            }
        }

        Ok(ProfileChanges {
            first_name: Self::clean("firstName", changes.first_name)?,
            last_name: Self::clean("lastName", changes.last_name)?,
            username,
            country: Self::clean("country", changes.country)?,
            gender: Self::clean("gender", changes.gender)?,
            date_of_birth: changes.date_of_birth,
            phone: Self::clean("phone", changes.phone)?,
            address_line: Self::clean("addressLine", changes.address_line)?,
            city: Self::clean("city", changes.city)?,
            state: Self::clean("state", changes.state)?,
            postal_code: Self::clean("postalCode", changes.postal_code)?,
        })
    }
}

#[async_trait]
impl<Q, R> UpdateUserProfileUseCase for UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, data: UpdateUserInput) -> Result<UserView, UpdateUserError> {
        let changes = Self::validate(data.changes)?;

        let user = self
            .user_query
            .find_by_id(data.user_id)
            .await?
            .ok_or(UpdateUserError::UserNotFound)?;

        if user.is_profile_locked() {
            return Err(UpdateUserError::ProfileLocked);
        }

        if changes.is_empty() {
            return Ok(user.sanitize());
        }

        if let Some(username) = &changes.username {
            if let Some(owner) = self.user_query.find_by_username(username).await? {
                if owner.id != user.id {
                    return Err(UpdateUserError::UsernameTaken);
                }
            }
        }

        let updated = self
            .user_repository
            .update_profile(user.id, changes)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UsernameTaken => UpdateUserError::UsernameTaken,
                UserRepositoryError::UserNotFound => UpdateUserError::UserNotFound,
                other => UpdateUserError::RepositoryError(other.to_string()),
            })?;

        Ok(updated.sanitize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::tests::support::fixtures::{unverified_user, verified_kyc_user};
    use crate::tests::support::in_memory::InMemoryUsers;
    use chrono::NaiveDate;

    fn service(users: &InMemoryUsers) -> UpdateUserProfileService<InMemoryUsers, InMemoryUsers> {
        UpdateUserProfileService::new(users.clone(), users.clone())
    }

    fn seeded(users: &InMemoryUsers, email: &str) -> UserId {
        let user = unverified_user(email);
        let id = user.id;
        users.insert(user);
        id
    }

    fn input(user_id: UserId, changes: ProfileChanges) -> UpdateUserInput {
        UpdateUserInput { user_id, changes }
    }

    #[tokio::test]
    async fn test_partial_merge_keeps_untouched_fields() {
        let users = InMemoryUsers::default();
        let id = seeded(&users, "a@x.com");

        let view = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    city: Some("  Lagos ".to_string()),
                    date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(view.city.as_deref(), Some("Lagos"));
        assert_eq!(view.first_name, "Jo");
        assert_eq!(view.country, "NG");
        assert_eq!(view.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 1));
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected() {
        let users = InMemoryUsers::default();
        let id = seeded(&users, "a@x.com");

        let err = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    last_name: Some("   ".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UpdateUserError::InvalidInput("lastName cannot be blank".to_string())
        );
    }

    #[tokio::test]
    async fn test_overlong_field_is_rejected() {
        let users = InMemoryUsers::default();
        let id = seeded(&users, "a@x.com");

        let err = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    address_line: Some("a".repeat(MAX_FIELD_LEN + 1)),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UpdateUserError::InvalidInput("addressLine must be at most 100 characters".to_string())
        );
    }

    #[tokio::test]
    async fn test_bad_username_format() {
        let users = InMemoryUsers::default();
        let id = seeded(&users, "a@x.com");

        let result = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    username: Some("no spaces!".to_string()),
                    ..Default::default()
                },
            ))
            .await;

        assert!(matches!(result, Err(UpdateUserError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_username_owned_by_someone_else() {
        let users = InMemoryUsers::default();
        let first = seeded(&users, "a@x.com");
        let second = seeded(&users, "b@x.com");
        let svc = service(&users);

        svc.execute(input(
            first,
            ProfileChanges {
                username: Some("jodoe".to_string()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

        let err = svc
            .execute(input(
                second,
                ProfileChanges {
                    username: Some("jodoe".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err, UpdateUserError::UsernameTaken);
    }

    #[tokio::test]
    async fn test_kyc_verified_profile_is_locked() {
        let users = InMemoryUsers::default();
        let user = verified_kyc_user("a@x.com");
        let id = user.id;
        users.insert(user);

        let err = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    first_name: Some("Changed".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err, UpdateUserError::ProfileLocked);
        assert_eq!(users.get(id).unwrap().profile.first_name, "Jo");
    }

    #[tokio::test]
    async fn test_future_date_of_birth() {
        let users = InMemoryUsers::default();
        let id = seeded(&users, "a@x.com");

        let result = service(&users)
            .execute(input(
                id,
                ProfileChanges {
                    date_of_birth: Some(Utc::now().date_naive() + chrono::Duration::days(2)),
                    ..Default::default()
                },
            ))
            .await;

        assert!(matches!(result, Err(UpdateUserError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let result = service(&InMemoryUsers::default())
            .execute(input(
                UserId::new(),
                ProfileChanges {
                    city: Some("Abuja".to_string()),
                    ..Default::default()
                },
            ))
            .await;

        assert_eq!(result.unwrap_err(), UpdateUserError::UserNotFound);
    }
}
