//! Display-credit bookkeeping: feature costs, admin redemption codes and an
//! in-memory ledger.
//!
//! Display credits are a UI-level allowance, separate from the provider-side
//! credit that the error classifier reports on. Nothing here persists;
//! callers own storage.

use crate::errors::KreatorError;

use super::options::VideoDuration;

/// A credit-consuming feature. Video features carry their clip length since
/// longer clips cost more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    CreateImage,
    EditImage,
    MergeImages,
    ImageTo3d,
    TextToVideo(VideoDuration),
    ImageToVideo(VideoDuration),
}

impl Feature {
    /// Every chargeable feature, for cost listings.
    pub const CATALOG: &'static [Feature] = &[
        Feature::CreateImage,
        Feature::EditImage,
        Feature::MergeImages,
        Feature::ImageTo3d,
        Feature::TextToVideo(VideoDuration::Secs5),
        Feature::TextToVideo(VideoDuration::Secs10),
        Feature::ImageToVideo(VideoDuration::Secs5),
        Feature::ImageToVideo(VideoDuration::Secs10),
    ];

    #[must_use]
    pub const fn display_cost(self) -> u32 {
        match self {
            Self::CreateImage => 6,
            Self::EditImage | Self::MergeImages => 40,
            Self::ImageTo3d => 10,
            Self::TextToVideo(VideoDuration::Secs5) | Self::ImageToVideo(VideoDuration::Secs5) => {
                80
            }
            Self::TextToVideo(VideoDuration::Secs10)
            | Self::ImageToVideo(VideoDuration::Secs10) => 120,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateImage => "Buat Gambar",
            Self::EditImage => "Edit Gambar",
            Self::MergeImages => "Gabung Gambar",
            Self::ImageTo3d => "Image to 3D",
            Self::TextToVideo(VideoDuration::Secs5) => "Teks ke Video (5 detik)",
            Self::TextToVideo(VideoDuration::Secs10) => "Teks ke Video (10 detik)",
            Self::ImageToVideo(VideoDuration::Secs5) => "Gambar ke Video (5 detik)",
            Self::ImageToVideo(VideoDuration::Secs10) => "Gambar ke Video (10 detik)",
        }
    }
}

/// Admin redemption codes and the credit they grant.
pub const ADMIN_CODE_CREDITS: &[(&str, u32)] = &[
    ("SANTRI2K", 2000),
    ("SANTRI3K", 3000),
    ("SANTRI4K", 4000),
    ("SANTRI5K", 5000),
    ("SANTRI6K", 6000),
    ("SANTRI7K", 7000),
    ("SANTRI8K", 8000),
    ("SANTRI9K", 9000),
    ("SANTRI10K", 10000),
];

/// Looks up the credit amount for an admin code. Input is trimmed and
/// uppercased before the exact match.
#[must_use]
pub fn credit_for_admin_code(code: &str) -> Option<u32> {
    let code = code.trim().to_ascii_uppercase();
    ADMIN_CODE_CREDITS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, amount)| *amount)
}

/// How a redemption code was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCreditType {
    Free,
    Fixed1000,
    Custom,
}

impl DisplayCreditType {
    pub const ALL: &'static [DisplayCreditType] =
        &[Self::Free, Self::Fixed1000, Self::Custom];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Fixed1000 => "fixed_1000",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Kode Gratis",
            Self::Fixed1000 => "1.000 Kredit",
            Self::Custom => "Custom Kredit",
        }
    }
}

/// In-memory display-credit balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditLedger {
    balance: u32,
}

impl CreditLedger {
    #[must_use]
    pub const fn new(balance: u32) -> Self {
        Self { balance }
    }

    #[must_use]
    pub const fn balance(&self) -> u32 {
        self.balance
    }

    pub fn grant(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Redeems an admin code, returning the amount granted, or `None` for an
    /// unknown code.
    pub fn redeem(&mut self, code: &str) -> Option<u32> {
        let amount = credit_for_admin_code(code)?;
        self.grant(amount);
        Some(amount)
    }

    /// Deducts a feature's cost, returning the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns the display-credit error when the balance cannot cover the
    /// feature's cost; the balance is left unchanged.
    pub fn charge(&mut self, feature: Feature) -> Result<u32, KreatorError> {
        let cost = feature.display_cost();
        if self.balance < cost {
            return Err(KreatorError::DisplayCredit {
                feature: feature.label().to_string(),
                cost,
                balance: self.balance,
            });
        }
        self.balance -= cost;
        Ok(self.balance)
    }
}
