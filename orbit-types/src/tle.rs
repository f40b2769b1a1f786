use crate::satellite::SatelliteId;

/// Unstructured TLE
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct UnstructuredTle {
    pub satellite_name: String,
    pub line1: String,
    pub line2: String,
}

impl UnstructuredTle {
    /// Catalog number from columns 3-7 of line 1
    pub fn catalog_number(&self) -> Option<SatelliteId> {
        self.line1
            .get(2..7)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(SatelliteId::from)
    }

    pub fn name(&self) -> &str {
        self.satellite_name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_number() {
        let tle = UnstructuredTle {
            satellite_name: "ISS (ZARYA)  ".to_owned(),
            line1: "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927"
                .to_owned(),
            line2: "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537"
                .to_owned(),
        };
        assert_eq!(tle.catalog_number(), Some(SatelliteId::new(25544)));
        assert_eq!(tle.name(), "ISS (ZARYA)");
    }

    #[test]
    fn catalog_number_short_line() {
        let tle = UnstructuredTle {
            satellite_name: "X".to_owned(),
            line1: "1 2".to_owned(),
            line2: String::new(),
        };
        assert_eq!(tle.catalog_number(), None);
    }
}
