//! Atomic-proposition text for program-graph locations.

/// Conversion of a location into its atomic-proposition text. Pair
/// locations produced by program-graph interleaving render as
/// `<left,right>`, recursively.
pub trait PropLabel {
    fn prop(&self) -> String;
}

impl PropLabel for String {
    fn prop(&self) -> String {
        self.clone()
    }
}

impl PropLabel for &str {
    fn prop(&self) -> String {
        (*self).to_owned()
    }
}

impl<T: PropLabel, U: PropLabel> PropLabel for (T, U) {
    fn prop(&self) -> String {
        format!("<{},{}>", self.0.prop(), self.1.prop())
    }
}

impl<T: PropLabel> PropLabel for Vec<T> {
    fn prop(&self) -> String {
        let inner = self
            .iter()
            .map(PropLabel::prop)
            .collect::<Vec<_>>()
            .join(",");
        format!("<{inner}>")
    }
}
