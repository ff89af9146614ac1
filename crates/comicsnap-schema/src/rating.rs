use std::ops::RangeInclusive;

pub const MAX_STARS: u8 = 5;
pub const WEIGHT_RANGE: RangeInclusive<f64> = 0.0..=5.0;
/// Step hinted by the weight input. Not enforced: any value in range is sent.
pub const WEIGHT_STEP: f64 = 0.5;

/// The two ways a comic gets rated: a discrete 1-5 star vote when it is added
/// to the read list, and a continuous 0-5 weight when it becomes a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    Stars,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Stars(u8),
    Weight(f64),
}

impl RatingScale {
    /// Star values to render, empty for the weight scale.
    pub fn stars(self) -> RangeInclusive<u8> {
        match self {
            RatingScale::Stars => 1..=MAX_STARS,
            RatingScale::Weight => 1..=0,
        }
    }

    pub fn select_star(self, value: u8) -> Option<Rating> {
        match self {
            RatingScale::Stars if (1..=MAX_STARS).contains(&value) => Some(Rating::Stars(value)),
            _ => None,
        }
    }

    pub fn parse_input(self, input: &str) -> Option<Rating> {
        match self {
            RatingScale::Weight => parse_weight(input).map(Rating::Weight),
            RatingScale::Stars => None,
        }
    }
}

impl Rating {
    /// Stars light up cumulatively: picking 3 highlights 1, 2 and 3.
    pub fn lights_star(&self, star: u8) -> bool {
        matches!(self, Rating::Stars(selected) if star <= *selected)
    }
}

pub fn parse_weight(input: &str) -> Option<f64> {
    let weight: f64 = input.trim().parse().ok()?;
    WEIGHT_RANGE.contains(&weight).then_some(weight)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_weight_bounds_are_inclusive() {
        assert_eq!(parse_weight("0"), Some(0.0));
        assert_eq!(parse_weight("5"), Some(5.0));
        assert_eq!(parse_weight(" 2.5 "), Some(2.5));
    }

    #[test]
    fn test_weight_rejects_invalid_input() {
        for input in ["", "-0.5", "5.01", "abc", "NaN", "inf", "-inf"] {
            assert_eq!(parse_weight(input), None, "{input}");
        }
    }

    #[test]
    fn test_weight_step_is_not_enforced() {
        assert_eq!(parse_weight("3.14"), Some(3.14));
    }

    #[test]
    fn test_star_selection() {
        assert_eq!(RatingScale::Stars.select_star(3), Some(Rating::Stars(3)));
        assert_eq!(RatingScale::Stars.select_star(0), None);
        assert_eq!(RatingScale::Stars.select_star(6), None);
        assert_eq!(RatingScale::Weight.select_star(3), None);
    }

    #[test]
    fn test_stars_light_up_cumulatively() {
        let rating = Rating::Stars(3);
        let lit: Vec<bool> = RatingScale::Stars.stars().map(|star| rating.lights_star(star)).collect();

        assert_eq!(lit, vec![true, true, true, false, false]);
        assert!(!Rating::Weight(5.0).lights_star(1));
    }

    #[test]
    fn test_weight_scale_has_no_stars() {
        assert_eq!(RatingScale::Weight.stars().count(), 0);
        assert_eq!(RatingScale::Weight.parse_input("4"), Some(Rating::Weight(4.0)));
        assert_eq!(RatingScale::Stars.parse_input("4"), None);
    }
}
