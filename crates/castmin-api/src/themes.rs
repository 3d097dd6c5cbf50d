// Theme endpoints
//
// `GET /admin-ng/themes/themes.json`, `POST /admin-ng/themes` (form
// encoded) and `DELETE /admin-ng/themes/{id}`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{ListParams, Page, ThemeDetailsResponse, ThemeRow};

/// Values of the "new theme" form.
///
/// File fields hold uploaded asset identifiers; they are only sent when
/// the corresponding section is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewTheme {
    pub name: String,
    pub description: String,
    pub default: bool,
    pub bumper_active: bool,
    pub bumper_file: Option<String>,
    pub trailer_active: bool,
    pub trailer_file: Option<String>,
    pub title_slide_active: bool,
    pub title_slide_mode: Option<String>,
    pub title_slide_background: Option<String>,
    pub license_slide_active: bool,
    pub license_slide_description: Option<String>,
    pub license_slide_background: Option<String>,
    pub watermark_active: bool,
    pub watermark_file: Option<String>,
    pub watermark_position: Option<String>,
}

impl NewTheme {
    /// Encode as the `application/x-www-form-urlencoded` field list the
    /// server expects.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("default", self.default.to_string()),
            ("bumperActive", self.bumper_active.to_string()),
            ("trailerActive", self.trailer_active.to_string()),
            ("titleSlideActive", self.title_slide_active.to_string()),
            ("licenseSlideActive", self.license_slide_active.to_string()),
            ("watermarkActive", self.watermark_active.to_string()),
        ];

        let mut push = |active: bool, key: &'static str, value: &Option<String>| {
            if let (true, Some(v)) = (active, value) {
                form.push((key, v.clone()));
            }
        };

        push(self.bumper_active, "bumperFile", &self.bumper_file);
        push(self.trailer_active, "trailerFile", &self.trailer_file);
        push(self.title_slide_active, "titleSlideMode", &self.title_slide_mode);
        push(
            self.title_slide_active,
            "titleSlideBackground",
            &self.title_slide_background,
        );
        push(
            self.license_slide_active,
            "licenseSlideDescription",
            &self.license_slide_description,
        );
        push(
            self.license_slide_active,
            "licenseSlideBackground",
            &self.license_slide_background,
        );
        push(self.watermark_active, "watermarkFile", &self.watermark_file);
        push(self.watermark_active, "watermarkPosition", &self.watermark_position);

        form
    }
}

impl AdminClient {
    /// List themes.
    ///
    /// `GET /admin-ng/themes/themes.json?limit&offset&filter&sort`
    pub async fn list_themes(&self, params: &ListParams) -> Result<Page<ThemeRow>, Error> {
        let url = self.url("/admin-ng/themes/themes.json")?;
        debug!(?params, "listing themes");
        self.get_json(url, params).await
    }

    /// Fetch one theme with its section settings.
    ///
    /// `GET /admin-ng/themes/{id}.json`
    pub async fn get_theme(&self, id: i64) -> Result<ThemeDetailsResponse, Error> {
        let url = self.url(&format!("/admin-ng/themes/{id}.json"))?;
        self.get_json(url, &[] as &[(&str, &str)]).await
    }

    /// Create a theme.
    ///
    /// `POST /admin-ng/themes` with a form-encoded body.
    pub async fn create_theme(&self, theme: &NewTheme) -> Result<(), Error> {
        let url = self.url("/admin-ng/themes")?;
        debug!(name = %theme.name, "creating theme");
        self.post_form(url, &theme.to_form()).await
    }

    /// Delete a theme.
    ///
    /// `DELETE /admin-ng/themes/{id}`
    pub async fn delete_theme(&self, id: i64) -> Result<(), Error> {
        let url = self.url(&format!("/admin-ng/themes/{id}"))?;
        debug!(id, "deleting theme");
        self.delete(url).await
    }
}
