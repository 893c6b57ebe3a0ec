//! Projects sub-client — create, edit, cancel, and image loading.

use chrono::{NaiveDate, Utc};

use crate::client::CrowdfundClient;
use crate::domain::project::image::{
    ImageError, ProjectImage, IMAGE_TOO_LARGE_BODY, IMAGE_TOO_LARGE_TITLE,
};
use crate::domain::project::{min_expire_date, EditProjectForm, NewProjectForm};
use crate::error::SdkError;
use crate::gateway::BackendGateway;
use crate::shared::ProjectId;
use crate::wallet::WalletBridge;

pub struct Projects<'a, G, W> {
    pub(crate) client: &'a CrowdfundClient<G, W>,
}

impl<'a, G: BackendGateway, W: WalletBridge> Projects<'a, G, W> {
    /// Create a project owned by the connected wallet. Returns its id.
    pub async fn create(&self, form: &NewProjectForm) -> Result<ProjectId, SdkError> {
        self.create_on(form, today()).await
    }

    pub(crate) async fn create_on(
        &self,
        form: &NewProjectForm,
        today: NaiveDate,
    ) -> Result<ProjectId, SdkError> {
        let session = self.client.auth().require_session().await?;
        let fields = form.validate(today).map_err(|e| {
            tracing::warn!(error = %e, "invalid new project form");
            SdkError::Validation(e.to_string())
        })?;

        let id = self
            .client
            .gateway
            .create_project(&fields)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create project");
                e
            })?;
        tracing::info!(project_id = %id, owner = %session.public_key, "project created");
        Ok(id)
    }

    /// Update a project the connected wallet owns.
    pub async fn edit(&self, form: &EditProjectForm) -> Result<ProjectId, SdkError> {
        self.edit_on(form, today()).await
    }

    pub(crate) async fn edit_on(
        &self,
        form: &EditProjectForm,
        today: NaiveDate,
    ) -> Result<ProjectId, SdkError> {
        self.client.auth().require_session().await?;
        let fields = form.validate(today).map_err(|e| {
            tracing::warn!(project_id = %form.project_id, error = %e, "invalid edit form");
            SdkError::Validation(e.to_string())
        })?;

        let id = self
            .client
            .gateway
            .edit_project(&fields)
            .await
            .map_err(|e| {
                tracing::error!(project_id = %form.project_id, error = %e, "failed to edit project");
                e
            })?;
        tracing::info!(project_id = %id, "project updated");
        Ok(id)
    }

    /// Cancel an active project. Returns the backend's message.
    pub async fn cancel(&self, project_id: &ProjectId) -> Result<String, SdkError> {
        self.client.auth().require_session().await?;
        let message = self
            .client
            .gateway
            .cancel_project(project_id)
            .await
            .map_err(|e| {
                tracing::error!(project_id = %project_id, error = %e, "failed to cancel project");
                e
            })?;
        self.client.modal.show("", &message);
        Ok(message)
    }

    /// Validate a picked file. A file over the size limit shows the
    /// "image too large" dialog.
    pub fn load_image(&self, bytes: Vec<u8>, content_type: &str) -> Result<ProjectImage, SdkError> {
        ProjectImage::from_bytes(bytes, content_type).map_err(|e| {
            tracing::warn!(error = %e, "image rejected");
            if matches!(e, ImageError::TooLarge { .. }) {
                self.client.modal.show(IMAGE_TOO_LARGE_TITLE, IMAGE_TOO_LARGE_BODY);
            }
            SdkError::Validation(e.to_string())
        })
    }

    /// Floor for the expiry date picker.
    pub fn min_expire_date(&self) -> String {
        min_expire_date()
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Session, CONNECT_WALLET_BODY};
    use crate::domain::project::image::MAX_IMAGE_BYTES;
    use crate::domain::project::Category;
    use crate::shared::PublicKey;
    use crate::testing::{GatewayCall, StubGateway, StubWallet};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn logged_in(gateway: StubGateway) -> CrowdfundClient<StubGateway, StubWallet> {
        CrowdfundClient::builder()
            .session(Session::new(PublicKey::from("GOWNER")))
            .build_with_gateway(gateway, StubWallet::new())
    }

    fn form() -> NewProjectForm {
        NewProjectForm {
            name: "Garden".into(),
            category: "environment".into(),
            goal: "300".into(),
            expire_date: "2026-11-30".into(),
            description: "Raised beds.".into(),
            image: Some(ProjectImage::from_bytes(vec![1, 2, 3], "image/jpeg").unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let client = logged_in(StubGateway::new().with_created_project("17"));
        let id = client.projects().create_on(&form(), day()).await.unwrap();
        assert_eq!(id, ProjectId::from("17"));

        match &client.gateway().calls()[0] {
            GatewayCall::CreateProject(fields) => {
                assert_eq!(fields.category, Category::Environment);
                assert_eq!(fields.goal, 300);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_requires_session() {
        let client = CrowdfundClient::builder().build_with_gateway(StubGateway::new(), StubWallet::new());
        let err = client.projects().create_on(&form(), day()).await.unwrap_err();
        assert!(matches!(err, SdkError::NotConnected));
        assert_eq!(client.modal().snapshot().body, CONNECT_WALLET_BODY);
        assert_eq!(client.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let client = logged_in(StubGateway::new());
        let mut bad = form();
        bad.expire_date = "2026-10-01".into();
        let err = client.projects().create_on(&bad, day()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_and_cancel() {
        let client = logged_in(StubGateway::new());
        let edit = EditProjectForm {
            project_id: ProjectId::from("9"),
            name: "Garden".into(),
            category: "environment".into(),
            goal: "400".into(),
            expire_date: "2026-12-31".into(),
            description: "More beds.".into(),
        };
        assert_eq!(
            client.projects().edit_on(&edit, day()).await.unwrap(),
            ProjectId::from("9")
        );

        let message = client.projects().cancel(&ProjectId::from("9")).await.unwrap();
        assert_eq!(client.modal().snapshot().body, message);
        assert_eq!(
            client.gateway().calls().last(),
            Some(&GatewayCall::CancelProject(ProjectId::from("9")))
        );
    }

    #[test]
    fn test_load_image_too_large_shows_dialog() {
        let client = logged_in(StubGateway::new());
        let err = client
            .projects()
            .load_image(vec![0; MAX_IMAGE_BYTES + 1], "image/png")
            .unwrap_err();
        assert!(err.is_validation());
        let snapshot = client.modal().snapshot();
        assert_eq!(snapshot.title, IMAGE_TOO_LARGE_TITLE);
        assert_eq!(snapshot.body, IMAGE_TOO_LARGE_BODY);
    }
}
