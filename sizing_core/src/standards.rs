//! # Standards
//!
//! The closed set of regulatory rule sets the engine can size against,
//! the conductor-size grammars they use, and traceable code-section
//! references for reporting.
//!
//! | Standard        | Sizes          | Lengths | Typical use                    |
//! |-----------------|----------------|---------|--------------------------------|
//! | `Nec`           | AWG / kcmil    | ft      | US residential to industrial   |
//! | `Iec`           | mm²            | m       | IEC 60364 installations        |
//! | `Bs7671`        | mm²            | m       | UK wiring regulations          |
//! | `DcAutomotive`  | AWG            | ft      | 12/24 V vehicle circuits       |
//! | `DcMarine`      | AWG            | ft      | ABYC boat DC systems           |
//! | `DcSolar`       | AWG / kcmil    | ft      | PV source and output circuits  |
//! | `DcTelecom`     | AWG / kcmil    | ft      | -48 V telecom power plants     |

use serde::{Deserialize, Serialize};

/// Code section references used in calculation metadata and factor chains.
pub mod code_ref {
    // NEC (NFPA 70)
    pub const NEC_AMPACITY: &str = "NEC Table 310.16";
    pub const NEC_FREE_AIR_AMPACITY: &str = "NEC Table 310.17";
    pub const NEC_TEMPERATURE: &str = "NEC 310.15(B)(1)";
    pub const NEC_GROUPING: &str = "NEC 310.15(C)(1)";
    pub const NEC_ROOFTOP: &str = "NEC 310.15(B)(2)";
    pub const NEC_TERMINATIONS: &str = "NEC 110.14(C)";
    pub const NEC_VOLTAGE_DROP: &str = "NEC 210.19(A) Informational Note 4";
    pub const NEC_RESISTANCE: &str = "NEC Chapter 9 Table 8";
    pub const NEC_REACTANCE: &str = "NEC Chapter 9 Table 9";
    pub const NEC_CONDUIT_FILL: &str = "NEC Chapter 9 Table 1";
    pub const NEC_CONDUIT_AREA: &str = "NEC Chapter 9 Table 4";
    pub const NEC_WIRE_AREA: &str = "NEC Chapter 9 Table 5";
    pub const NEC_CONTINUOUS_LOAD: &str = "NEC 210.20(A)";
    pub const NEC_STANDARD_RATINGS: &str = "NEC 240.6(A)";
    pub const NEC_SMALL_CONDUCTOR: &str = "NEC 240.4(D)";
    pub const NEC_PV_CURRENT: &str = "NEC 690.8(A)(1)";
    pub const NEC_PV_OCPD: &str = "NEC 690.9(B)";
    pub const NEC_STORAGE_BATTERY: &str = "NEC 480.7";

    // IEC 60364
    pub const IEC_AMPACITY: &str = "IEC 60364-5-52 Table B.52.4/B.52.5";
    pub const IEC_TEMPERATURE: &str = "IEC 60364-5-52 Table B.52.14";
    pub const IEC_GROUPING: &str = "IEC 60364-5-52 Table B.52.17";
    pub const IEC_METHODS: &str = "IEC 60364-5-52 Table B.52.1";
    pub const IEC_VOLTAGE_DROP: &str = "IEC 60364-5-52 Annex G";
    pub const IEC_RESISTANCE: &str = "IEC 60228 Class 2";
    pub const IEC_CONDUIT: &str = "IEC 61386";
    pub const IEC_OVERLOAD: &str = "IEC 60364-4-43 433.1";

    // BS 7671
    pub const BS_AMPACITY: &str = "BS 7671 Tables 4D1A/4E1A";
    pub const BS_TEMPERATURE: &str = "BS 7671 Table 4B1";
    pub const BS_GROUPING: &str = "BS 7671 Table 4C1";
    pub const BS_METHODS: &str = "BS 7671 Table 4A2";
    pub const BS_VOLTAGE_DROP: &str = "BS 7671 Appendix 4 Section 6.4";
    pub const BS_OVERLOAD: &str = "BS 7671 Regulation 433.1.1";
    pub const BS_DEVICES: &str = "BS EN 60898 / BS 88";

    // DC application codes
    pub const SAE_J1128: &str = "SAE J1128";
    pub const SAE_J2077: &str = "SAE J2077";
    pub const ISO_8820: &str = "ISO 8820";
    pub const ABYC_E11_AMPACITY: &str = "ABYC E-11 Table VI";
    pub const ABYC_E11_VOLTAGE_DROP: &str = "ABYC E-11.14";
    pub const ABYC_E11_OCP: &str = "ABYC E-11.10";
    pub const UL_4703: &str = "UL 4703 PV Wire";
    pub const IEC_60269_6: &str = "IEC 60269-6 gPV";
    pub const TELCORDIA_GR513: &str = "Telcordia GR-513-CORE";
    pub const ANSI_T1_311: &str = "ANSI T1.311";
}

/// Regulatory rule set a calculation is performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    /// US National Electrical Code (imperial, AWG/kcmil)
    Nec,
    /// IEC 60364 (metric, mm²)
    Iec,
    /// BS 7671 IET Wiring Regulations (UK, mm²)
    Bs7671,
    /// Low-voltage DC automotive (SAE J1128 wire, ISO 8820 fuses)
    DcAutomotive,
    /// Low-voltage DC marine (ABYC E-11)
    DcMarine,
    /// DC photovoltaic circuits (NEC Article 690)
    DcSolar,
    /// DC telecom power plants (-48 V)
    DcTelecom,
}

impl Standard {
    /// All standards in dispatch-table order
    pub const ALL: [Standard; 7] = [
        Standard::Nec,
        Standard::Iec,
        Standard::Bs7671,
        Standard::DcAutomotive,
        Standard::DcMarine,
        Standard::DcSolar,
        Standard::DcTelecom,
    ];

    /// Parse a standard identifier. Accepts canonical ids and common aliases.
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "nec" | "imperial" | "awg" | "nfpa70" | "nfpa_70" => Some(Standard::Nec),
            "iec" | "metric" | "iec60364" | "iec_60364" => Some(Standard::Iec),
            "bs7671" | "bs_7671" | "uk" | "bs" => Some(Standard::Bs7671),
            "dc_automotive" | "automotive" => Some(Standard::DcAutomotive),
            "dc_marine" | "marine" | "abyc" => Some(Standard::DcMarine),
            "dc_solar" | "solar" | "pv" => Some(Standard::DcSolar),
            "dc_telecom" | "telecom" => Some(Standard::DcTelecom),
            _ => None,
        }
    }

    /// Canonical identifier (matches serde representation)
    pub fn id(&self) -> &'static str {
        match self {
            Standard::Nec => "nec",
            Standard::Iec => "iec",
            Standard::Bs7671 => "bs7671",
            Standard::DcAutomotive => "dc_automotive",
            Standard::DcMarine => "dc_marine",
            Standard::DcSolar => "dc_solar",
            Standard::DcTelecom => "dc_telecom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Standard::Nec => "NEC (NFPA 70)",
            Standard::Iec => "IEC 60364",
            Standard::Bs7671 => "BS 7671",
            Standard::DcAutomotive => "DC Automotive",
            Standard::DcMarine => "DC Marine (ABYC)",
            Standard::DcSolar => "DC Solar (NEC 690)",
            Standard::DcTelecom => "DC Telecom",
        }
    }

    /// True for the low-voltage DC application profiles
    pub fn is_dc(&self) -> bool {
        matches!(
            self,
            Standard::DcAutomotive | Standard::DcMarine | Standard::DcSolar | Standard::DcTelecom
        )
    }

    /// Conductor-size grammar used by this standard
    pub fn size_system(&self) -> SizeSystem {
        match self {
            Standard::Iec | Standard::Bs7671 => SizeSystem::Metric,
            _ => SizeSystem::Awg,
        }
    }
}

impl std::fmt::Display for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Conductor-size label grammar.
///
/// Labels are normalized to a canonical form before catalog lookup:
/// `"12 AWG"`, `"1/0 AWG"`, `"250 kcmil"` or `"2.5 mm²"`. Whether the
/// normalized label exists is a catalog question, answered by
/// [`crate::catalog::StandardCatalog::conductor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSystem {
    /// AWG gauges and kcmil
    Awg,
    /// Metric cross-section in mm²
    Metric,
}

impl SizeSystem {
    /// Normalize a raw size label to its canonical form
    pub fn normalize(&self, raw: &str) -> Result<String, String> {
        match self {
            SizeSystem::Awg => normalize_awg(raw),
            SizeSystem::Metric => normalize_metric(raw),
        }
    }
}

fn normalize_awg(raw: &str) -> Result<String, String> {
    let lower = raw.trim().to_lowercase();
    let err = || format!("'{}' is not an AWG or kcmil size", raw.trim());

    for suffix in ["kcmil", "mcm"] {
        if let Some(num) = lower.strip_suffix(suffix) {
            let kcmil: u32 = num.trim().parse().map_err(|_| err())?;
            return Ok(format!("{} kcmil", kcmil));
        }
    }

    let mut body = lower.trim_start_matches('#').trim().to_string();
    for suffix in ["awg", "gauge", "ga"] {
        if let Some(stripped) = body.strip_suffix(suffix) {
            body = stripped.trim().to_string();
            break;
        }
    }

    let aught = match body.as_str() {
        "0" | "1/0" => Some(1),
        "00" | "2/0" => Some(2),
        "000" | "3/0" => Some(3),
        "0000" | "4/0" => Some(4),
        _ => None,
    };
    if let Some(n) = aught {
        return Ok(format!("{}/0 AWG", n));
    }

    let gauge: u32 = body.parse().map_err(|_| err())?;
    if gauge == 0 || gauge > 40 {
        return Err(err());
    }
    Ok(format!("{} AWG", gauge))
}

fn normalize_metric(raw: &str) -> Result<String, String> {
    let lower = raw.trim().to_lowercase();
    let mut body = lower.as_str();
    for suffix in ["mm²", "mm2", "sqmm", "mm"] {
        if let Some(stripped) = body.strip_suffix(suffix) {
            body = stripped;
            break;
        }
    }
    let value: f64 = body
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a metric size in mm²", raw.trim()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("'{}' is not a metric size in mm²", raw.trim()));
    }
    Ok(metric_label(value))
}

/// Canonical label for a metric cross-section
pub fn metric_label(mm2: f64) -> String {
    format!("{} mm²", mm2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_aliases() {
        assert_eq!(Standard::from_str_flexible("imperial"), Some(Standard::Nec));
        assert_eq!(Standard::from_str_flexible("UK"), Some(Standard::Bs7671));
        assert_eq!(Standard::from_str_flexible("dc-marine"), Some(Standard::DcMarine));
        assert_eq!(Standard::from_str_flexible("cec"), None);
    }

    #[test]
    fn test_id_roundtrip() {
        for standard in Standard::ALL {
            assert_eq!(Standard::from_str_flexible(standard.id()), Some(standard));
            let json = serde_json::to_string(&standard).unwrap();
            assert_eq!(json, format!("\"{}\"", standard.id()));
        }
    }

    #[test]
    fn test_awg_normalization() {
        let awg = SizeSystem::Awg;
        assert_eq!(awg.normalize("12").unwrap(), "12 AWG");
        assert_eq!(awg.normalize("#12").unwrap(), "12 AWG");
        assert_eq!(awg.normalize("12awg").unwrap(), "12 AWG");
        assert_eq!(awg.normalize("00").unwrap(), "2/0 AWG");
        assert_eq!(awg.normalize("4/0 AWG").unwrap(), "4/0 AWG");
        assert_eq!(awg.normalize("250 MCM").unwrap(), "250 kcmil");
        assert_eq!(awg.normalize("500kcmil").unwrap(), "500 kcmil");
        assert!(awg.normalize("2.5").is_err());
        assert!(awg.normalize("huge").is_err());
    }

    #[test]
    fn test_metric_normalization() {
        let metric = SizeSystem::Metric;
        assert_eq!(metric.normalize("2.5").unwrap(), "2.5 mm²");
        assert_eq!(metric.normalize("2.5mm2").unwrap(), "2.5 mm²");
        assert_eq!(metric.normalize("10 mm²").unwrap(), "10 mm²");
        assert!(metric.normalize("12 AWG").is_err());
        assert!(metric.normalize("-4").is_err());
    }
}
