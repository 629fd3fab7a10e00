pub mod upload_policy;

pub use upload_policy::{extension_for_mime, UploadPolicy, UploadRejection};
