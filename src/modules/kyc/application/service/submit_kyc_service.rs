use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::UserQuery;
use crate::kyc::application::domain::entities::{IdType, KycDocuments, KycSubmission};
use crate::kyc::application::ports::incoming::use_cases::{
    KycDocumentUpload, SubmitKycCommand, SubmitKycError, SubmitKycUseCase,
};
use crate::kyc::application::ports::outgoing::{KycRepository, KycRepositoryError, KycView};
use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::ports::outgoing::{FileCategory, FileStorage};

/// A document that passed the upload policy, waiting to be written.
struct CheckedDocument {
    mime: String,
    bytes: Vec<u8>,
}

pub struct SubmitKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    user_query: Q,
    kyc_repository: R,
    storage: Arc<dyn FileStorage>,
    policy: UploadPolicy,
}

impl<Q, R> SubmitKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    pub fn new(
        user_query: Q,
        kyc_repository: R,
        storage: Arc<dyn FileStorage>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            user_query,
            kyc_repository,
            storage,
            policy,
        }
    }

    fn check_document(
        &self,
        field: &'static str,
        upload: KycDocumentUpload,
    ) -> Result<CheckedDocument, SubmitKycError> {
        let mime = self
            .policy
            .check(
                &upload.file_name,
                upload.content_type.as_deref(),
                upload.bytes.len() as u64,
            )
            .map_err(|reason| SubmitKycError::InvalidDocument { field, reason })?;

        Ok(CheckedDocument {
            mime,
            bytes: upload.bytes,
        })
    }

    async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.storage.delete(path).await {
                warn!(path = %path, "Failed to remove orphaned KYC document: {}", e);
            }
        }
    }
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn document(value: Option<KycDocumentUpload>) -> Option<KycDocumentUpload> {
    value.filter(|d| !d.bytes.is_empty())
}

fn parse_date_of_birth(raw: &str) -> Result<NaiveDate, SubmitKycError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        SubmitKycError::InvalidInput("dob must be a date in YYYY-MM-DD format".to_string())
    })?;
    if date >= Utc::now().date_naive() {
        return Err(SubmitKycError::InvalidInput(
            "dob must be in the past".to_string(),
        ));
    }
    Ok(date)
}

#[async_trait]
impl<Q, R> SubmitKycUseCase for SubmitKycService<Q, R>
where
    Q: UserQuery,
    R: KycRepository,
{
    async fn execute(&self, command: SubmitKycCommand) -> Result<KycView, SubmitKycError> {
        let full_name = text(command.full_name);
        let date_of_birth = text(command.date_of_birth);
        let id_type = text(command.id_type);
        let id_number = text(command.id_number);
        let id_front = document(command.id_front);
        let id_back = document(command.id_back);
        let selfie = document(command.selfie);

        let mut missing = Vec::new();
        if full_name.is_none() {
            missing.push("fullName");
        }
        if date_of_birth.is_none() {
            missing.push("dob");
        }
        if id_type.is_none() {
            missing.push("idType");
        }
        if id_number.is_none() {
            missing.push("idNumber");
        }
        if id_front.is_none() {
            missing.push("idFront");
        }
        if id_back.is_none() {
            missing.push("idBack");
        }
        if selfie.is_none() {
            missing.push("selfie");
        }

        let (
            Some(full_name),
            Some(date_of_birth),
            Some(id_type),
            Some(id_number),
            Some(id_front),
            Some(id_back),
            Some(selfie),
        ) = (
            full_name,
            date_of_birth,
            id_type,
            id_number,
            id_front,
            id_back,
            selfie,
        )
        else {
            return Err(SubmitKycError::MissingFields(missing));
        };

        let date_of_birth = parse_date_of_birth(&date_of_birth)?;
        let id_type: IdType = id_type.parse().map_err(SubmitKycError::InvalidInput)?;

        // All three documents are validated before any of them is written.
        let documents = [
            self.check_document("idFront", id_front)?,
            self.check_document("idBack", id_back)?,
            self.check_document("selfie", selfie)?,
        ];

        let user = self
            .user_query
            .find_by_id(command.user_id)
            .await
            .map_err(|e| SubmitKycError::RepositoryError(e.to_string()))?
            .ok_or(SubmitKycError::UserNotFound)?;

        user.kyc.ensure_can_submit()?;

        let mut stored = Vec::with_capacity(documents.len());
        for doc in documents {
            match self
                .storage
                .store(FileCategory::KycDocument, &doc.mime, doc.bytes)
                .await
            {
                Ok(file) => stored.push(file.path),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(SubmitKycError::StorageError(e.to_string()));
                }
            }
        }

        let [id_front_path, id_back_path, selfie_path] = match <[String; 3]>::try_from(stored) {
            Ok(paths) => paths,
            Err(paths) => {
                self.discard(&paths).await;
                return Err(SubmitKycError::StorageError(
                    "unexpected number of stored documents".to_string(),
                ));
            }
        };
        let documents = KycDocuments {
            id_front_path,
            id_back_path,
            selfie_path,
        };
        let paths = [
            documents.id_front_path.clone(),
            documents.id_back_path.clone(),
            documents.selfie_path.clone(),
        ];

        let mut record = user.kyc.clone();
        if let Err(e) = record.submit(
            KycSubmission {
                full_name,
                date_of_birth,
                id_type,
                id_number,
                documents,
            },
            Utc::now(),
        ) {
            self.discard(&paths).await;
            return Err(e.into());
        }

        let saved = match self.kyc_repository.save_record(user.id, &record).await {
            Ok(saved) => saved,
            Err(e) => {
                self.discard(&paths).await;
                return Err(match e {
                    KycRepositoryError::UserNotFound => SubmitKycError::UserNotFound,
                    KycRepositoryError::DatabaseError(msg) => SubmitKycError::RepositoryError(msg),
                });
            }
        };

        info!(user_id = %saved.id, "KYC submitted for review");
        Ok(KycView::from(&saved.kyc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::kyc::application::domain::entities::KycStatus;
    use crate::storage::application::domain::UploadRejection;
    use crate::tests::support::fixtures::{unverified_user, verified_kyc_user};
    use crate::tests::support::in_memory::{InMemoryStorage, InMemoryUsers};
    use uuid::Uuid;

    fn service(
        users: &InMemoryUsers,
        storage: &InMemoryStorage,
    ) -> SubmitKycService<InMemoryUsers, InMemoryUsers> {
        SubmitKycService::new(
            users.clone(),
            users.clone(),
            Arc::new(storage.clone()),
            UploadPolicy::kyc_documents(1024),
        )
    }

    fn jpeg(name: &str) -> Option<KycDocumentUpload> {
        Some(KycDocumentUpload {
            file_name: name.to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8, 0xFF],
        })
    }

    fn complete(user_id: UserId) -> SubmitKycCommand {
        SubmitKycCommand {
            user_id,
            full_name: Some("Jo Doe".to_string()),
            date_of_birth: Some("1990-01-02".to_string()),
            id_type: Some("passport".to_string()),
            id_number: Some("A1234567".to_string()),
            id_front: jpeg("front.jpg"),
            id_back: jpeg("back.jpg"),
            selfie: jpeg("selfie.jpg"),
        }
    }

    fn seeded(users: &InMemoryUsers) -> UserId {
        let user = unverified_user("a@x.com");
        let id = user.id;
        users.insert(user);
        id
    }

    #[tokio::test]
    async fn test_complete_submission_moves_to_submitted() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);

        let view = service(&users, &storage).execute(complete(id)).await.unwrap();

        assert_eq!(view.status, KycStatus::Submitted);
        assert!(!view.verified);
        assert!(view.submitted_at.is_some());
        let docs = view.documents.unwrap();
        assert!(docs.id_front_path.starts_with("/uploads/kyc/"));
        assert!(storage.contains(&docs.selfie_path));
        assert_eq!(storage.len(), 3);

        let stored = users.get(id).unwrap();
        assert_eq!(stored.kyc.status, KycStatus::Submitted);
        assert_eq!(stored.kyc.submission.unwrap().id_number, "A1234567");
    }

    #[tokio::test]
    async fn test_missing_document_leaves_state_unchanged() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);

        let mut command = complete(id);
        command.selfie = None;

        let err = service(&users, &storage).execute(command).await.unwrap_err();

        assert_eq!(err, SubmitKycError::MissingFields(vec!["selfie"]));
        assert_eq!(users.get(id).unwrap().kyc.status, KycStatus::None);
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_all_missing_fields_are_reported() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);

        let command = SubmitKycCommand {
            user_id: id,
            full_name: Some("   ".to_string()),
            id_front: jpeg("front.jpg"),
            ..Default::default()
        };

        let err = service(&users, &storage).execute(command).await.unwrap_err();

        assert_eq!(
            err,
            SubmitKycError::MissingFields(vec![
                "fullName", "dob", "idType", "idNumber", "idBack", "selfie"
            ])
        );
    }

    #[tokio::test]
    async fn test_bad_document_type_stores_nothing() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);

        let mut command = complete(id);
        command.id_back = Some(KycDocumentUpload {
            file_name: "back.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: vec![1],
        });

        let err = service(&users, &storage).execute(command).await.unwrap_err();

        assert_eq!(
            err,
            SubmitKycError::InvalidDocument {
                field: "idBack",
                reason: UploadRejection::UnsupportedType("text/plain".to_string()),
            }
        );
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_invalid_id_type_and_date() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);
        let svc = service(&users, &storage);

        let mut bad_type = complete(id);
        bad_type.id_type = Some("library_card".to_string());
        assert!(matches!(
            svc.execute(bad_type).await,
            Err(SubmitKycError::InvalidInput(_))
        ));

        let mut bad_date = complete(id);
        bad_date.date_of_birth = Some("02/01/1990".to_string());
        assert!(matches!(
            svc.execute(bad_date).await,
            Err(SubmitKycError::InvalidInput(_))
        ));

        let mut future = complete(id);
        future.date_of_birth = Some("2999-01-01".to_string());
        assert!(matches!(
            svc.execute(future).await,
            Err(SubmitKycError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_second_submission_while_pending_is_rejected() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);
        let svc = service(&users, &storage);

        svc.execute(complete(id)).await.unwrap();
        let err = svc.execute(complete(id)).await.unwrap_err();

        assert_eq!(err, SubmitKycError::AlreadySubmitted);
        assert_eq!(storage.len(), 3);
    }

    #[tokio::test]
    async fn test_verified_user_cannot_resubmit() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let user = verified_kyc_user("a@x.com");
        let id = user.id;
        users.insert(user);

        let err = service(&users, &storage)
            .execute(complete(id))
            .await
            .unwrap_err();

        assert_eq!(err, SubmitKycError::AlreadyVerified);
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_rejected_user_can_resubmit() {
        let users = InMemoryUsers::default();
        let storage = InMemoryStorage::default();
        let id = seeded(&users);
        let svc = service(&users, &storage);

        svc.execute(complete(id)).await.unwrap();
        let mut user = users.get(id).unwrap();
        user.kyc
            .reject(Uuid::new_v4(), "blurry photo", Utc::now())
            .unwrap();
        users.insert(user);

        let view = svc.execute(complete(id)).await.unwrap();

        assert_eq!(view.status, KycStatus::Submitted);
        assert!(view.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let storage = InMemoryStorage::default();

        let err = service(&InMemoryUsers::default(), &storage)
            .execute(complete(UserId::new()))
            .await
            .unwrap_err();

        assert_eq!(err, SubmitKycError::UserNotFound);
        assert_eq!(storage.len(), 0);
    }
}
