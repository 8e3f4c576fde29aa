use std::fmt;

use crate::fields::{self, FieldSpec};

/// The conditions the app can screen for, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Disease {
    #[default]
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::HeartDisease, Disease::Parkinsons];

    /// Entry shown in the sidebar.
    pub fn menu_label(self) -> &'static str {
        self.condition()
    }

    /// Name of the condition as used in verdicts.
    pub fn condition(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::HeartDisease => "Heart Disease",
            Disease::Parkinsons => "Parkinson's Disease",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::HeartDisease => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinson's Disease Prediction",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Test Result",
            Disease::HeartDisease => "Heart Disease Test Result",
            Disease::Parkinsons => "Parkinson's Disease Test Result",
        }
    }

    /// Name the classifier is registered under.
    pub fn model_name(self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Parkinsons => "parkinsons",
        }
    }

    /// File name of the artifact inside the models directory.
    pub fn artifact_file(self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes-prediction.json",
            Disease::HeartDisease => "heart-disease-prediction-model.json",
            Disease::Parkinsons => "parkinsons_model.json",
        }
    }

    /// The form fields, in the order the classifier expects its features.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Disease::Diabetes => fields::DIABETES,
            Disease::HeartDisease => fields::HEART_DISEASE,
            Disease::Parkinsons => fields::PARKINSONS,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Disease::Diabetes => 0,
            Disease::HeartDisease => 1,
            Disease::Parkinsons => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.condition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for d in Disease::ALL {
            assert_eq!(Disease::from_index(d.index()), Some(d));
        }
        assert_eq!(Disease::from_index(3), None);
    }

    #[test]
    fn parkinsons_feature_order() {
        let keys: Vec<_> = Disease::Parkinsons.fields().iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            [
                "MDVP:Fo(Hz)",
                "MDVP:Fhi(Hz)",
                "MDVP:Flo(Hz)",
                "MDVP:Jitter(%)",
                "MDVP:Jitter(Abs)",
                "MDVP:RAP",
                "MDVP:PPQ",
                "Jitter:DDP",
                "MDVP:Shimmer",
                "MDVP:Shimmer(dB)",
                "Shimmer:APQ3",
                "Shimmer:APQ5",
                "MDVP:APQ",
                "Shimmer:DDA",
                "NHR",
                "HNR",
                "RPDE",
                "DFA",
                "spread1",
                "spread2",
                "D2",
                "PPE",
            ]
        );
    }
}
