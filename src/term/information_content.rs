use crate::{f64_from_usize, PhenoError, PhenoResult};

/// The information content of a [`Term`](`crate::Term`)
///
/// It is derived from the fraction of diseases that are annotated to the
/// term itself or to any of its descendants. Rare terms carry a higher
/// information content than common ones.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct InformationContent {
    disease: f64,
}

impl InformationContent {
    /// Returns the disease-specific information content
    pub fn disease(&self) -> f64 {
        self.disease
    }

    /// Calculates and sets the disease-specific information content
    ///
    /// `total` is the number of all diseases, `current` the number of diseases
    /// linked to the term. When either of them is `0`, the information content
    /// is `0`.
    ///
    /// # Errors
    ///
    /// Returns [`PhenoError::InvalidInput`] if `current` is larger than `total`
    pub fn set_disease(&mut self, total: usize, current: usize) -> PhenoResult<()> {
        if current > total {
            return Err(PhenoError::InvalidInput(format!(
                "term is linked to {current} of {total} diseases"
            )));
        }
        self.disease = if total == 0 || current == 0 {
            0.0
        } else {
            -(f64_from_usize(current) / f64_from_usize(total)).ln()
        };
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn information_content() {
        let mut ic = InformationContent::default();
        assert_eq!(ic.disease(), 0.0);

        ic.set_disease(10, 10).unwrap();
        assert_eq!(ic.disease(), 0.0);

        ic.set_disease(10, 1).unwrap();
        assert!((ic.disease() - 10f64.ln()).abs() < 1e-12);

        ic.set_disease(0, 0).unwrap();
        assert_eq!(ic.disease(), 0.0);

        assert!(ic.set_disease(1, 2).is_err());
    }
}
