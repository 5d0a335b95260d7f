// SPDX-License-Identifier: MIT
//
// swatch-color: the conversion layer of swatch.
//
// Everything here is a pure function over small `Copy` values. Channels are
// `u8`, hue is normalized on construction and hex strings only exist in
// their canonical `#rrggbb` form, so the invariants the generators rely on
// hold by construction instead of being checked at every call site.
//
// Conversion graph:
//
//   hex string ──► Rgb ──► Hsv
//        ▲          │ ▲     │
//        └──────────┘ └─────┘
//                   │
//                   └──► relative luminance (0–100)

pub mod error;
pub mod hex;
pub mod metrics;
pub mod space;

pub use error::ColorError;
pub use hex::{Hex, hex_to_rgb, is_valid_hex, rgb_to_hex};
pub use metrics::ColorMetrics;
pub use space::{
    Hsv, Rgb, calculate_luminance, calculate_rgb_distance_sq, hsv_to_hex, hsv_to_rgb, rgb_to_hsv,
};
