use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CloudinarySecrets {
    #[serde(rename = "cloudName")]
    pub cloud_name: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "apiSecret")]
    pub api_secret: String,
    #[serde(rename = "uploadPreset")]
    pub upload_preset: Option<String>,
    pub folder: Option<String>,
    #[serde(rename = "apiBase")]
    pub api_base: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseSecrets {
    #[serde(rename = "storageUrl")]
    pub storage_url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Secrets {
    #[serde(rename = "cloudinarySecrets")]
    pub cloudinary_secrets: Option<CloudinarySecrets>,
    #[serde(rename = "supabaseSecrets")]
    pub supabase_secrets: Option<SupabaseSecrets>,
}
