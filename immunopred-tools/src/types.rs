//! Common types for method selection

use crate::predictors::{
    NetCtlPan11, NetMhc30a, NetMhc34, NetMhcIi22, NetMhcIiPan30, NetMhcPan24, NetMhcPan28,
    PickPocket11,
};
use crate::traits::PredictionMethod;
use immunopred_core::ImmunopredError;
use serde::{Deserialize, Serialize};

/// Prediction methods that can be selected by identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    NetMhc30a,
    NetMhc34,
    NetMhcPan24,
    NetMhcPan28,
    NetMhcIi22,
    NetMhcIiPan30,
    PickPocket11,
    NetCtlPan11,
}

impl Method {
    pub fn all() -> &'static [Method] {
        &[
            Method::NetMhc30a,
            Method::NetMhc34,
            Method::NetMhcPan24,
            Method::NetMhcPan28,
            Method::NetMhcIi22,
            Method::NetMhcIiPan30,
            Method::PickPocket11,
            Method::NetCtlPan11,
        ]
    }

    /// Identifier used on the command line and in config
    pub fn id(&self) -> &'static str {
        match self {
            Method::NetMhc30a => "netmhc-3.0a",
            Method::NetMhc34 => "netmhc-3.4",
            Method::NetMhcPan24 => "netmhcpan-2.4",
            Method::NetMhcPan28 => "netmhcpan-2.8",
            Method::NetMhcIi22 => "netmhcii-2.2",
            Method::NetMhcIiPan30 => "netmhciipan-3.0",
            Method::PickPocket11 => "pickpocket-1.1",
            Method::NetCtlPan11 => "netctlpan-1.1",
        }
    }

    /// Get the display name of the tool
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::NetMhc30a => "NetMHC 3.0a",
            Method::NetMhc34 => "NetMHC 3.4",
            Method::NetMhcPan24 => "NetMHCpan 2.4",
            Method::NetMhcPan28 => "NetMHCpan 2.8",
            Method::NetMhcIi22 => "NetMHCII 2.2",
            Method::NetMhcIiPan30 => "NetMHCIIpan 3.0",
            Method::PickPocket11 => "PickPocket 1.1",
            Method::NetCtlPan11 => "NetCTLpan 1.1",
        }
    }

    /// Construct the adapter, loading its allele table
    pub fn create(&self) -> Box<dyn PredictionMethod> {
        match self {
            Method::NetMhc30a => Box::new(NetMhc30a::new()),
            Method::NetMhc34 => Box::new(NetMhc34::new()),
            Method::NetMhcPan24 => Box::new(NetMhcPan24::new()),
            Method::NetMhcPan28 => Box::new(NetMhcPan28::new()),
            Method::NetMhcIi22 => Box::new(NetMhcIi22::new()),
            Method::NetMhcIiPan30 => Box::new(NetMhcIiPan30::new()),
            Method::PickPocket11 => Box::new(PickPocket11::new()),
            Method::NetCtlPan11 => Box::new(NetCtlPan11::new()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Method {
    type Err = ImmunopredError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Method::all()
            .iter()
            .copied()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| ImmunopredError::UnknownMethod(s.to_string()))
    }
}
