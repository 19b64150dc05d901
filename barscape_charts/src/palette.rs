// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack categories and their fixed colors.

extern crate alloc;

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use peniko::Color;

use crate::error::ChartError;

/// One kind of timed operation contributing to a stacked bar.
///
/// The declaration order is the palette order: segments are stacked bottom-up
/// in this order in every cell, whatever the dataset contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Checking out a workspace.
    Checkout,
    /// Committing changes.
    Commit,
    /// Creating a branch.
    Branch,
    /// Tearing the workspace down.
    Destruction,
    /// Disconnecting the user.
    Disconnect,
}

impl Category {
    /// Every category, in palette order.
    pub const ALL: [Self; 5] = [
        Self::Checkout,
        Self::Commit,
        Self::Branch,
        Self::Destruction,
        Self::Disconnect,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// The lowercase name used in datasets and legends.
    pub fn name(self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::Commit => "commit",
            Self::Branch => "branch",
            Self::Destruction => "destruction",
            Self::Disconnect => "disconnect",
        }
    }

    /// Position in palette order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ChartError::UnknownCategory(s.to_string()))
    }
}

/// One palette entry: a category and its 24-bit `0xRRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    /// The category this color belongs to.
    pub category: Category,
    /// Packed `0xRRGGBB` color.
    pub rgb: u32,
}

impl Swatch {
    /// The swatch color as an opaque [`Color`].
    pub fn color(&self) -> Color {
        let [_, r, g, b] = self.rgb.to_be_bytes();
        Color::from_rgb8(r, g, b)
    }
}

/// Static mapping from category to color.
///
/// Layout never picks colors itself; it attaches the palette entry to each bar
/// segment so the renderer can look colors up without a second table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryPalette {
    swatches: [Swatch; Category::COUNT],
}

impl CategoryPalette {
    /// The standard palette.
    pub const STANDARD: Self = Self {
        swatches: [
            Swatch {
                category: Category::Checkout,
                rgb: 0xef0000,
            },
            Swatch {
                category: Category::Commit,
                rgb: 0x336699,
            },
            Swatch {
                category: Category::Branch,
                rgb: 0xfec211,
            },
            Swatch {
                category: Category::Destruction,
                rgb: 0x3bc371,
            },
            Swatch {
                category: Category::Disconnect,
                rgb: 0x666699,
            },
        ],
    };

    /// The entry for `category`.
    pub fn swatch(&self, category: Category) -> Swatch {
        self.swatches[category.index()]
    }

    /// Entries in palette order.
    pub fn iter(&self) -> impl Iterator<Item = Swatch> + '_ {
        self.swatches.iter().copied()
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn palette_iterates_in_declaration_order() {
        let order: alloc::vec::Vec<Category> =
            CategoryPalette::STANDARD.iter().map(|s| s.category).collect();
        assert_eq!(order, Category::ALL);
        for (i, c) in Category::ALL.into_iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(CategoryPalette::STANDARD.swatch(c).category, c);
        }
    }

    #[test]
    fn categories_parse_by_lowercase_name() {
        assert_eq!("branch".parse::<Category>(), Ok(Category::Branch));
        assert_eq!(
            "Branch".parse::<Category>(),
            Err(ChartError::UnknownCategory("Branch".into()))
        );
    }

    #[test]
    fn swatch_color_unpacks_rgb_bytes() {
        let swatch = CategoryPalette::STANDARD.swatch(Category::Branch);
        let rgba = swatch.color().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0xfe, 0xc2, 0x11, 0xff));
    }
}
