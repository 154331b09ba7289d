//! Vendor broadcast kinds
//!
//! Each supported scanner family announces a decoded barcode with its own
//! broadcast action. This module names them and maps between the short
//! vendor names and the raw action strings a host receives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The scanner broadcast kinds understood by the default rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanAction {
    /// Generic scanner service broadcast (XM and compatible firmware)
    Xm,
    /// Shinow scanner service
    Shiniow,
    /// iData terminals
    Idata,
    /// YBX decode broadcast
    Ybx,
    /// PL terminals, raw bytes with an explicit length extra
    Pl,
    /// Warehouse barcode data broadcast
    BarcodeData,
    /// Honeywell data wedge
    Honeywell,
    /// Seuic scanner service
    Seuic,
    /// Newland (nlscan)
    Nl,
    /// YTO terminals
    Yto,
}

impl ScanAction {
    /// Every broadcast kind, in registration order
    pub const ALL: [ScanAction; 10] = [
        ScanAction::Xm,
        ScanAction::Shiniow,
        ScanAction::Idata,
        ScanAction::Ybx,
        ScanAction::Pl,
        ScanAction::BarcodeData,
        ScanAction::Honeywell,
        ScanAction::Seuic,
        ScanAction::Nl,
        ScanAction::Yto,
    ];

    /// Short vendor name, e.g. `"HONEYWELL"`
    pub fn name(&self) -> &'static str {
        match self {
            ScanAction::Xm => "XM",
            ScanAction::Shiniow => "SHINIOW",
            ScanAction::Idata => "IDATA",
            ScanAction::Ybx => "YBX",
            ScanAction::Pl => "PL",
            ScanAction::BarcodeData => "BARCODE_DATA",
            ScanAction::Honeywell => "HONEYWELL",
            ScanAction::Seuic => "SEUIC",
            ScanAction::Nl => "NL",
            ScanAction::Yto => "YTO",
        }
    }

    /// The broadcast action string emitted by the device
    pub fn action(&self) -> &'static str {
        match self {
            ScanAction::Xm => "com.android.server.scannerservice.broadcast",
            ScanAction::Shiniow => "com.android.server.scannerservice.shinow",
            ScanAction::Idata => "android.intent.action.SCANRESULT",
            ScanAction::Ybx => "android.intent.ACTION_DECODE_DATA",
            ScanAction::Pl => "scan.rcv.message",
            ScanAction::BarcodeData => "com.ehsy.warehouse.action.BARCODE_DATA",
            ScanAction::Honeywell => "com.honeywell.decode.intent.action.EDIT_DATA",
            ScanAction::Seuic => "com.android.scanner.service_settings",
            ScanAction::Nl => "nlscan.action.SCANNER_RESULT",
            ScanAction::Yto => "com.yto.action.GET_SCANDATA",
        }
    }

    /// Look up a broadcast kind by short name or by broadcast action
    pub fn from_identifier(identifier: &str) -> Option<ScanAction> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == identifier || kind.action() == identifier)
    }
}

impl fmt::Display for ScanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known broadcast kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown scanner broadcast: {0}")]
pub struct UnknownScanAction(pub String);

impl FromStr for ScanAction {
    type Err = UnknownScanAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| UnknownScanAction(s.to_string()))
    }
}
