//! One-shot Drive v3 calls used to provision a spreadsheet: copy, move, share.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::GoogleClient;
use crate::error::{GoogleError, Result};

/// A Drive file as returned by copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Access level granted when sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Commenter,
    Writer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Reader => "reader",
            Role::Commenter => "commenter",
            Role::Writer => "writer",
        })
    }
}

/// Someone to share with, written `email` or `email:role` (role defaults to writer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub email: String,
    pub role: Role,
}

impl FromStr for ShareTarget {
    type Err = GoogleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GoogleError::InvalidShareTarget(s.to_string());
        let (email, role) = match s.rsplit_once(':') {
            Some((email, role)) => {
                let role = match role.trim().to_ascii_lowercase().as_str() {
                    "reader" => Role::Reader,
                    "commenter" => Role::Commenter,
                    "writer" => Role::Writer,
                    _ => return Err(invalid()),
                };
                (email, role)
            }
            None => (s, Role::Writer),
        };

        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(invalid());
        }

        Ok(Self {
            email: email.to_string(),
            role,
        })
    }
}

#[derive(Deserialize)]
struct Parents {
    #[serde(default)]
    parents: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Permission<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    role: Role,
    email_address: &'a str,
}

impl GoogleClient {
    /// Copy a file (typically a template spreadsheet) under a new name.
    pub async fn copy_file(&self, file_id: &str, name: &str) -> Result<FileRef> {
        let url = self.drive_url(&["drive", "v3", "files", file_id, "copy"])?;
        let request = self
            .http()
            .post(url)
            .query(&[
                ("supportsAllDrives", "true"),
                ("fields", "id,name,webViewLink"),
            ])
            .json(&serde_json::json!({ "name": name }));

        let file: FileRef = self.send_json(request).await?;
        tracing::info!("Copied {} to '{}' ({})", file_id, file.name, file.id);
        Ok(file)
    }

    /// Move a file into `folder_id`, removing it from its current parents.
    pub async fn move_file(&self, file_id: &str, folder_id: &str) -> Result<()> {
        let url = self.drive_url(&["drive", "v3", "files", file_id])?;
        let request = self
            .http()
            .get(url.clone())
            .query(&[("fields", "parents"), ("supportsAllDrives", "true")]);
        let current: Parents = self.send_json(request).await?;
        let remove = current.parents.join(",");

        let request = self
            .http()
            .patch(url)
            .query(&[
                ("addParents", folder_id),
                ("removeParents", remove.as_str()),
                ("supportsAllDrives", "true"),
                ("fields", "id,parents"),
            ])
            .json(&serde_json::json!({}));

        self.send_empty(request).await?;
        tracing::info!("Moved {} into folder {}", file_id, folder_id);
        Ok(())
    }

    /// Grant a user access to a file.
    pub async fn share_file(&self, file_id: &str, target: &ShareTarget) -> Result<()> {
        let url = self.drive_url(&["drive", "v3", "files", file_id, "permissions"])?;
        let body = Permission {
            kind: "user",
            role: target.role,
            email_address: &target.email,
        };
        let request = self
            .http()
            .post(url)
            .query(&[("supportsAllDrives", "true"), ("sendNotificationEmail", "true")])
            .json(&body);

        self.send_empty(request).await?;
        tracing::info!("Shared {} with {} as {}", file_id, target.email, target.role);
        Ok(())
    }
}
