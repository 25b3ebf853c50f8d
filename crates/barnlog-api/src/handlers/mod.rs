pub mod photo_upload;
