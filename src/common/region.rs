// Handles region things
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::meta::region::future;
use aws_config::meta::region::{
    ProvideRegion,
    RegionProviderChain,
};
use aws_types::region;
use tracing::debug;

/// Region used when neither the command line nor the AWS provider chain
/// supplies one.
const FALLBACK_REGION: &str = "us-east-1";

/// The AWS region a client is created in, if one was selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    region: Option<region::Region>,
}

impl Region {
    /// Returns a `Region` with nothing selected. The AWS default provider
    /// chain will be consulted when the client is created.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the region name
    pub fn name(&self) -> &str {
        match &self.region {
            Some(region) => region.as_ref(),
            None         => "default",
        }
    }

    /// Select a specific region.
    pub fn set_region(mut self, region: &str) -> Self {
        debug!("Region set to: {:?}", region);

        let region = region::Region::new(region.to_string());
        self.region = Some(region);
        self
    }

    /// Returns a provider chain that tries our selected region, then the AWS
    /// default chain, and finally `us-east-1`.
    pub fn provider(&self) -> RegionProviderChain {
        RegionProviderChain::first_try(self.clone())
            .or_default_provider()
            .or_else(region::Region::new(FALLBACK_REGION))
    }
}

impl ProvideRegion for Region {
    // Takes our region string and returns a proper AWS Region, this should
    // allow us to pass our Region into AWS SDK functions expecting an AWS
    // Region.
    fn region(&self) -> future::ProvideRegion {
        future::ProvideRegion::ready(self.region.to_owned())
    }
}
