//! Closed vocabularies used by the API (indicator types, priorities, enclave types, ...).

// self
use crate::{_prelude::*, models::ModelError};

macro_rules! def_kind {
	($name:ident, $doc:literal, $kind:literal, { $($(#[$meta:meta])* $variant:ident => $wire:literal),+ $(,)? }) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				$(#[$meta])*
				#[serde(rename = $wire)]
				$variant,
			)+
		}
		impl $name {
			/// Every variant in declaration order.
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			/// Returns the wire representation.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $wire,)+
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = ModelError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($wire => Ok(Self::$variant),)+
					other => Err(ModelError::UnknownVariant { kind: $kind, value: other.to_owned() }),
				}
			}
		}
	};
}

def_kind!(IndicatorType, "Indicator categories recognized by the API.", "indicator type", {
	/// IPv4/IPv6 address.
	Ip => "IP",
	/// CIDR network block.
	CidrBlock => "CIDR_BLOCK",
	/// URL or domain.
	Url => "URL",
	/// Email address.
	EmailAddress => "EMAIL_ADDRESS",
	/// MD5 digest.
	Md5 => "MD5",
	/// SHA-1 digest.
	Sha1 => "SHA1",
	/// SHA-256 digest.
	Sha256 => "SHA256",
	/// Malware family name.
	Malware => "MALWARE",
	/// Software name.
	Software => "SOFTWARE",
	/// Windows registry key.
	RegistryKey => "REGISTRY_KEY",
	/// CVE identifier.
	Cve => "CVE",
	/// Bitcoin wallet address.
	BitcoinAddress => "BITCOIN_ADDRESS",
});

def_kind!(PriorityLevel, "Priority score assigned to an indicator.", "priority level", {
	/// No priority score was computed.
	NotFound => "NOT_FOUND",
	/// Low priority.
	Low => "LOW",
	/// Medium priority.
	Medium => "MEDIUM",
	/// High priority.
	High => "HIGH",
});

def_kind!(IdType, "Which identifier a report lookup uses.", "id type", {
	/// TruSTAR-assigned GUID.
	Internal => "internal",
	/// Identifier assigned by the external source system.
	External => "external",
});

def_kind!(DistributionType, "Whether a report is shared to enclaves or the community.", "distribution type", {
	/// Restricted to the report's enclaves.
	Enclave => "ENCLAVE",
	/// Shared with the whole community.
	Community => "COMMUNITY",
});

def_kind!(EnclaveType, "Enclave categories.", "enclave type", {
	/// Open enclave.
	Open => "OPEN",
	/// Company-internal enclave.
	Internal => "INTERNAL",
	/// Closed enclave.
	Closed => "CLOSED",
	/// Uncategorized enclave.
	Other => "OTHER",
	/// Research enclave.
	Research => "RESEARCH",
	/// Community enclave.
	Community => "COMMUNITY",
});
