use std::sync::Arc;

use crate::kyc::application::ports::incoming::use_cases::{
    ApproveKycUseCase, GetKycStatusUseCase, ListKycSubmissionsUseCase, RejectKycUseCase,
    SubmitKycUseCase,
};

#[derive(Clone)]
pub struct KycUseCases {
    pub submit: Arc<dyn SubmitKycUseCase + Send + Sync>,
    pub get_status: Arc<dyn GetKycStatusUseCase + Send + Sync>,
    pub approve: Arc<dyn ApproveKycUseCase + Send + Sync>,
    pub reject: Arc<dyn RejectKycUseCase + Send + Sync>,
    pub list_submissions: Arc<dyn ListKycSubmissionsUseCase + Send + Sync>,
}
