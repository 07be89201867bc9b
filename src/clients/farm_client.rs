//! Provides the `FarmClient` for requesting the record of a single farm.
//!
//! This client is an intermediate builder obtained via [`AgroClimate::farm()`].

use crate::sources::{FaoSources, FarmSources};
use crate::{AgroClimate, AgroClimateError, FarmRecord};
use bon::bon;

/// A client builder for farm records.
///
/// Calling `.id(farm_id).region(code).call()` runs the farm pipeline and
/// returns a [`Result<FarmRecord, AgroClimateError>`].
pub struct FarmClient<'a, S = FaoSources> {
    client: &'a AgroClimate<S>,
}

#[bon]
impl<'a, S: FarmSources> FarmClient<'a, S> {
    pub(crate) fn new(client: &'a AgroClimate<S>) -> Self {
        Self { client }
    }

    /// Starts a request for the farm with the given id.
    ///
    /// The id drives every deterministic choice made for the farm: its name,
    /// location offset, soil type and irrigation method. The same id and
    /// region always yield the same synthesized values.
    ///
    /// # Required Builder Methods
    ///
    /// * `.region(&str)`: FAOSTAT region code the farm belongs to. Unknown
    ///   codes fall back to the default region profile.
    ///
    /// # Errors
    ///
    /// Returns [`AgroClimateError::PrimaryAccess`] if the FAOSTAT portal cannot be reached.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use agroclimate::{AgroClimate, AgroClimateError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AgroClimateError> {
    /// let client = AgroClimate::new()?;
    /// let record = client.farm().id(7).region("3").call().await?;
    /// println!("{} covers {} ha", record.farm_info.name, record.farm_info.size);
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = id)]
    #[doc(hidden)]
    pub async fn build_farm(
        &self,
        #[builder(start_fn)] farm_id: i64,
        region: &str,
    ) -> Result<FarmRecord, AgroClimateError> {
        self.client
            .farm_record()
            .farm_id(farm_id)
            .region(region)
            .call()
            .await
    }
}
