//! Static option lists offered to users: image styles, output sizes and
//! video parameters. Values are what the APIs consume, labels are what the
//! UI shows.

/// A selectable value with its Indonesian display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const IMAGE_STYLES: &[SelectOption] = &[
    SelectOption { value: "default", label: "Default" },
    SelectOption { value: "photorealistic", label: "Photorealistic" },
    SelectOption { value: "realistic", label: "Realistic" },
    SelectOption { value: "anime", label: "Anime & Manga" },
    SelectOption { value: "cinematic", label: "Cinematic Film" },
    SelectOption { value: "fantasy", label: "Fantasy Art" },
    SelectOption { value: "scifi_futuristic", label: "Sci-Fi Futuristic" },
    SelectOption { value: "cyberpunk_neon", label: "Cyberpunk & Neon" },
    SelectOption { value: "vintage_retro", label: "Vintage & Retro" },
    SelectOption { value: "comic_cartoon", label: "Comic & Cartoon" },
    SelectOption { value: "3d_cgi", label: "3D CGI" },
    SelectOption { value: "studio_ghibli", label: "Studio Ghibli" },
    SelectOption { value: "miniature_fantasy", label: "Miniature Fantasy" },
];

/// Image output sizes as `width*height` pixel pairs.
pub const IMAGE_SIZES: &[SelectOption] = &[
    SelectOption { value: "768*1344", label: "Potret (9:16)" },
    SelectOption { value: "1344*768", label: "Layar Lebar (16:9)" },
    SelectOption { value: "1024*1024", label: "Kotak (1:1)" },
    SelectOption { value: "832*1216", label: "Potret (2:3)" },
    SelectOption { value: "1216*832", label: "Lanskap (3:2)" },
];

pub const VIDEO_ASPECT_RATIOS: &[SelectOption] = &[
    SelectOption { value: "16:9", label: "Layar Lebar (16:9)" },
    SelectOption { value: "9:16", label: "Potret (9:16)" },
    SelectOption { value: "1:1", label: "Kotak (1:1)" },
    SelectOption { value: "4:3", label: "Standar (4:3)" },
    SelectOption { value: "3:4", label: "Potret (3:4)" },
];

/// Supported video clip lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoDuration {
    Secs5,
    Secs10,
}

pub const DEFAULT_VIDEO_DURATION: VideoDuration = VideoDuration::Secs5;

impl VideoDuration {
    #[must_use]
    pub const fn seconds(self) -> u32 {
        match self {
            Self::Secs5 => 5,
            Self::Secs10 => 10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Secs5 => "5 detik",
            Self::Secs10 => "10 detik",
        }
    }

    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Option<Self> {
        match seconds {
            5 => Some(Self::Secs5),
            10 => Some(Self::Secs10),
            _ => None,
        }
    }
}

#[must_use]
pub fn find_style(value: &str) -> Option<&'static SelectOption> {
    IMAGE_STYLES.iter().find(|o| o.value == value)
}

#[must_use]
pub fn find_image_size(value: &str) -> Option<&'static SelectOption> {
    IMAGE_SIZES.iter().find(|o| o.value == value)
}

#[must_use]
pub fn is_video_aspect_ratio(value: &str) -> bool {
    VIDEO_ASPECT_RATIOS.iter().any(|o| o.value == value)
}
