//! Static catalog of supported Latin American target markets.

/// Bumped whenever a catalog attribute changes, so stored assessments can be
/// traced to the catalog they were ranked against.
pub const CATALOG_VERSION: u32 = 1;

/// Reference data for one candidate country.
///
/// `size`, `complexity` and `digital` are 1-5 ordinals: market size,
/// regulatory burden, and digital-health maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub size: u8,
    pub complexity: u8,
    pub digital: u8,
    pub highlights: &'static str,
}

/// Declaration order is the tie-break order of the market ranking.
pub static MARKETS: [MarketProfile; 9] = [
    MarketProfile {
        key: "mexico",
        name: "México",
        flag: "🇲🇽",
        size: 5,
        complexity: 3,
        digital: 4,
        highlights: "Largest market, 628 healthtech startups, FDA equivalence",
    },
    MarketProfile {
        key: "colombia",
        name: "Colombia",
        flag: "🇨🇴",
        size: 4,
        complexity: 3,
        digital: 5,
        highlights: "Best telemedicine regulation, interoperable EHR mandatory from 2025",
    },
    MarketProfile {
        key: "costarica",
        name: "Costa Rica",
        flag: "🇨🇷",
        size: 2,
        complexity: 2,
        digital: 5,
        highlights: "Highly digitized (EDUS), stable, RTCA hub",
    },
    MarketProfile {
        key: "panama",
        name: "Panamá",
        flag: "🇵🇦",
        size: 2,
        complexity: 2,
        digital: 4,
        highlights: "Regional hub, Johns Hopkins affiliation, dollarized",
    },
    MarketProfile {
        key: "peru",
        name: "Perú",
        flag: "🇵🇪",
        size: 3,
        complexity: 4,
        digital: 3,
        highlights: "Long registration times, $7M KOICA investment",
    },
    MarketProfile {
        key: "ecuador",
        name: "Ecuador",
        flag: "🇪🇨",
        size: 2,
        complexity: 3,
        digital: 3,
        highlights: "Dollarized, CAN route for cosmetics, $50M IDB investment",
    },
    MarketProfile {
        key: "dominicana",
        name: "Rep. Dominicana",
        flag: "🇩🇴",
        size: 2,
        complexity: 2,
        digital: 3,
        highlights: "#1 medical tourism destination in the Caribbean, DR-CAFTA",
    },
    MarketProfile {
        key: "elsalvador",
        name: "El Salvador",
        flag: "🇸🇻",
        size: 1,
        complexity: 2,
        digital: 3,
        highlights: "$77M CAF investment, $500M Google contract",
    },
    MarketProfile {
        key: "guatemala",
        name: "Guatemala",
        flag: "🇬🇹",
        size: 2,
        complexity: 3,
        digital: 2,
        highlights: "Most populous in Central America, $312M CABEI hospital program",
    },
];

/// Look up a market by its stable key
pub fn find_market(key: &str) -> Option<&'static MarketProfile> {
    MARKETS.iter().find(|m| m.key == key)
}

/// Display name for a market key, falling back to the key itself
pub fn market_name(key: &str) -> &str {
    find_market(key).map(|m| m.name).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_nine_unique_keys() {
        let mut keys: Vec<&str> = MARKETS.iter().map(|m| m.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_ordinals_in_range() {
        for market in &MARKETS {
            for ordinal in [market.size, market.complexity, market.digital] {
                assert!((1..=5).contains(&ordinal), "{} out of range", market.key);
            }
        }
    }

    #[test]
    fn test_find_market() {
        assert_eq!(find_market("peru").map(|m| m.complexity), Some(4));
        assert!(find_market("chile").is_none());
    }

    #[test]
    fn test_market_name_fallback() {
        assert_eq!(market_name("costarica"), "Costa Rica");
        assert_eq!(market_name("chile"), "chile");
    }
}
