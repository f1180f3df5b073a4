use crate::{descriptor::DescriptorType, error::Error, model::api::DescriptorDto};

use super::ApiClient;

impl ApiClient {
    /// Primary descriptor of one version, from the GA4GH TRS endpoint.
    pub async fn get_descriptor(
        &self,
        trs_id: &str,
        version: &str,
        descriptor_type: DescriptorType,
    ) -> Result<DescriptorDto, Error> {
        let id = urlencoding::encode(trs_id).into_owned();
        let version = urlencoding::encode(version).into_owned();

        self.get(&format!(
            "/ga4gh/trs/v2/tools/{id}/versions/{version}/{}/descriptor",
            descriptor_type.trs_name()
        ))
        .await
    }
}
