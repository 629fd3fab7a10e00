//! In-memory port implementations for service and end-to-end tests.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::admin::application::ports::outgoing::{
    AdminQuery, AdminQueryError, AdminUserSummary, CountryCount, KycCounts, UserFilter,
    UserStats,
};
use crate::auth::application::domain::entities::{
    NewUser, ProfileChanges, Role, User, UserId,
};
use crate::auth::application::ports::outgoing::{
    TokenPurpose, TokenRepository, TokenRepositoryError, UserQuery, UserQueryError,
    UserRepository, UserRepositoryError, VerificationTokenError, VerificationTokenRepository,
};
use crate::funding::application::domain::entities::{
    FundingRequest, FundingStatus, NewFundingRequest,
};
use crate::funding::application::ports::outgoing::{
    FundingFilter, FundingQuery, FundingQueryError, FundingRepository, FundingRepositoryError,
};
use crate::kyc::application::domain::entities::{KycRecord, KycStatus};
use crate::kyc::application::ports::outgoing::{
    KycQuery, KycQueryError, KycRepository, KycRepositoryError, KycSubmissionSummary,
};
use crate::referral::application::ports::outgoing::{
    ReferralQuery, ReferralQueryError, ReferredUser,
};
use crate::shared::{PageRequest, PageResult};
use crate::storage::application::domain::extension_for_mime;
use crate::storage::application::ports::outgoing::{
    FileCategory, FileStorage, StorageError, StoredFile,
};

//
// ──────────────────────────────────────────────────────────
// Users
// ──────────────────────────────────────────────────────────
//

/// Shared user table; clones see the same rows. Insertion order is kept.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    rows: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUsers {
    /// Inserts or replaces by id.
    pub fn insert(&self, user: User) {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => rows.push(user),
        }
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn find_email(&self, email: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn snapshot(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }

    fn update<F>(&self, id: UserId, f: F) -> Result<User, UserRepositoryError>
    where
        F: FnOnce(&mut User),
    {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    fn verified_referrals(&self, id: UserId) -> u64 {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.referrer_id == Some(id) && u.email_verified)
            .count() as u64
    }

    fn newest_first(&self) -> Vec<User> {
        let mut users = self.snapshot();
        users.reverse();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self.find_email(email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|u| {
                u.profile
                    .username
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(username))
            }))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        if let Some(username) = &new_user.profile.username {
            if rows.iter().any(|u| {
                u.profile
                    .username
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(username))
            }) {
                return Err(UserRepositoryError::UsernameTaken);
            }
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: Role::User,
            profile: new_user.profile,
            email_verified: false,
            referrer_id: new_user.referrer_id,
            kyc: KycRecord::default(),
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn mark_email_verified(&self, user_id: UserId) -> Result<User, UserRepositoryError> {
        self.update(user_id, |u| u.email_verified = true)
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.password_hash = new_password_hash)
            .map(|_| ())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        if let Some(username) = &changes.username {
            let taken = self.snapshot().iter().any(|u| {
                u.id != user_id
                    && u.profile
                        .username
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(username))
            });
            if taken {
                return Err(UserRepositoryError::UsernameTaken);
            }
        }
        self.update(user_id, |u| changes.apply_to(&mut u.profile))
    }

    async fn set_avatar(
        &self,
        user_id: UserId,
        avatar_path: String,
    ) -> Result<User, UserRepositoryError> {
        self.update(user_id, |u| u.profile.avatar_path = Some(avatar_path))
    }
}

#[async_trait]
impl KycRepository for InMemoryUsers {
    async fn save_record(
        &self,
        user_id: UserId,
        record: &KycRecord,
    ) -> Result<User, KycRepositoryError> {
        self.update(user_id, |u| u.kyc = record.clone())
            .map_err(|_| KycRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl KycQuery for InMemoryUsers {
    async fn list_submissions(
        &self,
        status: Option<KycStatus>,
        page: PageRequest,
    ) -> Result<PageResult<KycSubmissionSummary>, KycQueryError> {
        let mut matching: Vec<User> = self
            .snapshot()
            .into_iter()
            .filter(|u| match status {
                Some(s) => u.kyc.status == s,
                None => u.kyc.status != KycStatus::None,
            })
            .collect();
        matching.sort_by(|a, b| b.kyc.submitted_at.cmp(&a.kyc.submitted_at));

        let summaries = matching.iter().map(KycSubmissionSummary::from).collect();
        Ok(PageResult::from_vec(summaries, page))
    }
}

#[async_trait]
impl ReferralQuery for InMemoryUsers {
    async fn list_referred(
        &self,
        referrer: UserId,
    ) -> Result<Vec<ReferredUser>, ReferralQueryError> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|u| u.referrer_id == Some(referrer))
            .map(|u| ReferredUser {
                id: u.id.value(),
                first_name: u.profile.first_name,
                email_verified: u.email_verified,
                joined_at: u.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl AdminQuery for InMemoryUsers {
    async fn list_users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<PageResult<AdminUserSummary>, AdminQueryError> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let summaries = self
            .newest_first()
            .into_iter()
            .filter(|u| filter.kyc_status.map_or(true, |s| u.kyc.status == s))
            .filter(|u| match &needle {
                None => true,
                Some(n) => [
                    Some(u.email.as_str()),
                    Some(u.profile.first_name.as_str()),
                    Some(u.profile.last_name.as_str()),
                    u.profile.username.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(n.as_str())),
            })
            .map(|u| AdminUserSummary::new(&u, self.verified_referrals(u.id)))
            .collect();

        Ok(PageResult::from_vec(summaries, page))
    }

    async fn user_stats(&self) -> Result<UserStats, AdminQueryError> {
        let users = self.snapshot();
        let mut kyc = KycCounts::default();
        let mut by_country: Vec<CountryCount> = Vec::new();

        for user in &users {
            kyc.add(user.kyc.status, 1);
            match by_country
                .iter_mut()
                .find(|c| c.country == user.profile.country)
            {
                Some(entry) => entry.count += 1,
                None => by_country.push(CountryCount {
                    country: user.profile.country.clone(),
                    count: 1,
                }),
            }
        }
        by_country.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));

        Ok(UserStats {
            total_users: users.len() as u64,
            email_verified: users.iter().filter(|u| u.email_verified).count() as u64,
            kyc,
            by_country,
        })
    }

    async fn recent_users(&self, limit: u64) -> Result<Vec<AdminUserSummary>, AdminQueryError> {
        Ok(self
            .newest_first()
            .into_iter()
            .take(limit as usize)
            .map(|u| AdminUserSummary::new(&u, self.verified_referrals(u.id)))
            .collect())
    }

    async fn referral_count(&self, user_id: UserId) -> Result<u64, AdminQueryError> {
        Ok(self.verified_referrals(user_id))
    }
}

//
// ──────────────────────────────────────────────────────────
// Verification / reset tokens
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct StoredToken {
    user_id: UserId,
    purpose: TokenPurpose,
    hash: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct InMemoryVerificationTokens {
    rows: Arc<Mutex<Vec<StoredToken>>>,
}

impl InMemoryVerificationTokens {
    /// Email-verification hashes currently stored for `user_id`.
    pub fn hashes_for(&self, user_id: UserId) -> Vec<String> {
        self.hashes_for_purpose(user_id, TokenPurpose::EmailVerification)
    }

    pub fn hashes_for_purpose(&self, user_id: UserId, purpose: TokenPurpose) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.purpose == purpose)
            .map(|t| t.hash.clone())
            .collect()
    }
}

#[async_trait]
impl VerificationTokenRepository for InMemoryVerificationTokens {
    async fn store(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), VerificationTokenError> {
        self.rows.lock().unwrap().push(StoredToken {
            user_id,
            purpose,
            hash: token_hash,
            expires_at,
        });
        Ok(())
    }

    async fn consume(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationTokenError> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows
            .iter()
            .position(|t| t.user_id == user_id && t.purpose == purpose && t.hash == token_hash);

        Ok(match position {
            Some(i) => rows.remove(i).expires_at > now,
            None => false,
        })
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
    ) -> Result<u64, VerificationTokenError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.user_id == user_id && t.purpose == purpose));
        Ok((before - rows.len()) as u64)
    }
}

//
// ──────────────────────────────────────────────────────────
// Session deny list
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryDenyList {
    revoked: Arc<Mutex<HashSet<Uuid>>>,
}

impl InMemoryDenyList {
    pub fn revoke(&self, jti: Uuid) {
        self.revoked.lock().unwrap().insert(jti);
    }

    pub fn is_revoked(&self, jti: Uuid) -> bool {
        self.revoked.lock().unwrap().contains(&jti)
    }
}

#[async_trait]
impl TokenRepository for InMemoryDenyList {
    async fn revoke_token(
        &self,
        jti: Uuid,
        _user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        if expires_at <= Utc::now() {
            return Err(TokenRepositoryError::AlreadyExpired);
        }
        self.revoke(jti);
        Ok(())
    }

    async fn is_token_revoked(&self, jti: Uuid) -> Result<bool, TokenRepositoryError> {
        Ok(self.is_revoked(jti))
    }
}

//
// ──────────────────────────────────────────────────────────
// File storage
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    paths: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryStorage {
    pub fn contains(&self, path: &str) -> bool {
        self.paths.lock().unwrap().contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStorage for InMemoryStorage {
    async fn store(
        &self,
        category: FileCategory,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StorageError> {
        let path = format!(
            "/uploads/{}/{}.{}",
            category.dir_name(),
            Uuid::new_v4(),
            extension_for_mime(mime)
        );
        self.paths.lock().unwrap().insert(path.clone());
        Ok(StoredFile {
            path,
            size: bytes.len() as u64,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.paths.lock().unwrap().remove(path);
        Ok(())
    }
}

//
// ──────────────────────────────────────────────────────────
// Funding requests
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryFunding {
    rows: Arc<Mutex<Vec<FundingRequest>>>,
}

impl InMemoryFunding {
    pub fn put(&self, request: FundingRequest) {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == request.id) {
            Some(existing) => *existing = request,
            None => rows.push(request),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<FundingRequest> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn newest_first(&self) -> Vec<FundingRequest> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.reverse();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl FundingRepository for InMemoryFunding {
    async fn insert(
        &self,
        request: NewFundingRequest,
    ) -> Result<FundingRequest, FundingRepositoryError> {
        let created = request.into_pending(Uuid::new_v4(), Utc::now());
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn save_review(
        &self,
        request: &FundingRequest,
    ) -> Result<FundingRequest, FundingRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or(FundingRepositoryError::NotFound)?;
        if existing.status != FundingStatus::Pending {
            return Err(FundingRepositoryError::NotPending);
        }
        *existing = request.clone();
        Ok(existing.clone())
    }
}

#[async_trait]
impl FundingQuery for InMemoryFunding {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FundingRequest>, FundingQueryError> {
        Ok(self.get(id))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FundingRequest>, FundingQueryError> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|r| r.user_id == user_id.value())
            .collect())
    }

    async fn list(
        &self,
        filter: FundingFilter,
        page: PageRequest,
    ) -> Result<PageResult<FundingRequest>, FundingQueryError> {
        let matching = self
            .newest_first()
            .into_iter()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| filter.kind.map_or(true, |k| r.kind == k))
            .collect();
        Ok(PageResult::from_vec(matching, page))
    }

    async fn count_by_status(&self, status: FundingStatus) -> Result<u64, FundingQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == status)
            .count() as u64)
    }
}
