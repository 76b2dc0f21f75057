//! TON address parsing and validation
//!
//! Handles the user-facing friendly form: 36 bytes encoded as base64
//! (standard or URL-safe alphabet), laid out as tag byte, workchain byte,
//! 32-byte account hash and a CRC16/XMODEM checksum over the first 34 bytes.
//! The tag carries the bounceable flag and an optional testnet-only bit.

use crate::error::{Error, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use std::fmt;
use std::str::FromStr;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET_ONLY: u8 = 0x80;

/// Byte length of a decoded friendly address
const FRIENDLY_LEN: usize = 36;

/// A parsed TON account address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TonAddress {
    workchain: i8,
    hash: [u8; 32],
    bounceable: bool,
    testnet_only: bool,
}

impl TonAddress {
    pub fn new(workchain: i8, hash: [u8; 32], bounceable: bool, testnet_only: bool) -> Self {
        TonAddress {
            workchain,
            hash,
            bounceable,
            testnet_only,
        }
    }

    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Whether transfers to this address should request a bounce on failure
    ///
    /// Carried by the friendly-form tag byte; uninitialized wallets are
    /// normally paid with non-bounceable addresses so funds are not returned.
    pub fn is_bounceable(&self) -> bool {
        self.bounceable
    }

    pub fn is_testnet_only(&self) -> bool {
        self.testnet_only
    }

    /// Raw form: `workchain:hex(hash)`, e.g. `0:2cf3...`
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    fn to_friendly_bytes(&self) -> [u8; FRIENDLY_LEN] {
        let mut tag = if self.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if self.testnet_only {
            tag |= TAG_TESTNET_ONLY;
        }

        let mut bytes = [0u8; FRIENDLY_LEN];
        bytes[0] = tag;
        bytes[1] = self.workchain as u8;
        bytes[2..34].copy_from_slice(&self.hash);
        let crc = crc16_xmodem(&bytes[..34]);
        bytes[34..36].copy_from_slice(&crc.to_be_bytes());
        bytes
    }
}

impl FromStr for TonAddress {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        // Friendly addresses circulate in both base64 alphabets
        let bytes = URL_SAFE
            .decode(address)
            .or_else(|_| STANDARD.decode(address))
            .map_err(|e| Error::Address(format!("invalid base64 in {:?}: {}", address, e)))?;

        if bytes.len() != FRIENDLY_LEN {
            return Err(Error::Address(format!(
                "address {:?} decodes to {} bytes, expected {}",
                address,
                bytes.len(),
                FRIENDLY_LEN
            )));
        }

        let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc16_xmodem(&bytes[..34]) != expected {
            return Err(Error::Address(format!(
                "address {:?} failed checksum verification",
                address
            )));
        }

        let testnet_only = bytes[0] & TAG_TESTNET_ONLY != 0;
        let bounceable = match bytes[0] & !TAG_TESTNET_ONLY {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            tag => {
                return Err(Error::Address(format!(
                    "address {:?} has unknown tag byte {:#04x}",
                    address, tag
                )))
            }
        };

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);

        Ok(TonAddress {
            workchain: bytes[1] as i8,
            hash,
            bounceable,
            testnet_only,
        })
    }
}

impl fmt::Display for TonAddress {
    /// Encodes the friendly form with the URL-safe alphabet
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&URL_SAFE.encode(self.to_friendly_bytes()))
    }
}

/// Validate an address string without keeping the parse result
pub fn is_valid_address(address: &str) -> bool {
    address.parse::<TonAddress>().is_ok()
}

/// CRC16/XMODEM (poly 0x1021, init 0), as used by friendly addresses
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
