//! Static descriptors for the inputs of every prediction form.
//!
//! The order of each list is the feature order the corresponding classifier was trained on.

/// The amount of columns every form is laid out in.
pub const COLUMNS: usize = 3;

/// One selectable value of a [`FieldKind::Choice`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub value: f64,
    pub caption: &'static str,
}

impl ChoiceOption {
    pub const fn new(value: f64, caption: &'static str) -> Self {
        Self { value, caption }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer,
    Decimal,
    /// A fixed set of values picked from a list, never empty.
    Choice(&'static [ChoiceOption]),
}

/// A single numeric input of a form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Feature name, unique within its form.
    pub key: &'static str,
    /// Caption shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
    pub minimum: Option<f64>,
    pub step: f64,
    /// Whether the user must provide a value before the form can be submitted.
    pub required: bool,
    /// Column of the form the input is drawn in, `0..COLUMNS`.
    pub column: usize,
}

impl FieldSpec {
    pub const fn integer(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Integer,
            minimum: None,
            step: 1.,
            required: false,
            column: 0,
        }
    }

    pub const fn decimal(key: &'static str, label: &'static str, step: f64) -> Self {
        Self {
            kind: FieldKind::Decimal,
            step,
            ..Self::integer(key, label)
        }
    }

    pub const fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [ChoiceOption],
    ) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            ..Self::integer(key, label)
        }
    }

    pub const fn min(self, minimum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn column(self, column: usize) -> Self {
        Self { column, ..self }
    }

    /// Returns the value a fresh form shows for this field.
    pub fn default_value(&self) -> f64 {
        match self.kind {
            FieldKind::Choice(options) => options.first().map_or(0., |o| o.value),
            _ => 0.,
        }
    }

    /// Brings `value` into the domain of this field: integers are rounded and anything
    /// below `minimum` is raised to it.
    ///
    /// # Errors
    /// Returns a human-readable reason if the value can't be represented by this field.
    pub fn coerce(&self, value: f64) -> Result<f64, String> {
        if !value.is_finite() {
            return Err(format!("{value} is not a number"));
        }

        let value = match self.kind {
            FieldKind::Integer => value.round(),
            FieldKind::Decimal => value,
            FieldKind::Choice(options) => {
                return options
                    .iter()
                    .find(|o| o.value == value)
                    .map(|o| o.value)
                    .ok_or_else(|| format!("{value} is not one of the options"));
            }
        };

        Ok(match self.minimum {
            Some(min) if value < min => min,
            _ => value,
        })
    }

    /// Parses user-typed text into a value for this field.
    ///
    /// # Errors
    /// Returns a human-readable reason if the text is not a valid value.
    pub fn parse(&self, text: &str) -> Result<f64, String> {
        let text = text.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| format!("'{text}' is not a number"))?;

        if self.kind == FieldKind::Integer && value.fract() != 0. {
            return Err(format!("'{text}' must be a whole number"));
        }

        if let Some(min) = self.minimum {
            if value < min {
                return Err(format!("must be at least {min}"));
            }
        }

        self.coerce(value)
    }

    /// Formats a value the way the input control displays it.
    pub fn display(&self, value: f64) -> String {
        match self.kind {
            FieldKind::Integer => format!("{value:.0}"),
            FieldKind::Decimal => format!("{value:.*}", decimals(self.step)),
            FieldKind::Choice(options) => options
                .iter()
                .find(|o| o.value == value)
                .map_or_else(|| value.to_string(), |o| o.caption.to_string()),
        }
    }
}

/// Amount of decimals needed to show multiples of `step`.
fn decimals(step: f64) -> usize {
    let mut digits = 0;
    let mut scaled = step;
    while digits < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.;
        digits += 1;
    }
    digits
}

const SEX: &[ChoiceOption] = &[ChoiceOption::new(0., "Female"), ChoiceOption::new(1., "Male")];

const CHEST_PAIN: &[ChoiceOption] = &[
    ChoiceOption::new(0., "0"),
    ChoiceOption::new(1., "1"),
    ChoiceOption::new(2., "2"),
    ChoiceOption::new(3., "3"),
];

const BINARY: &[ChoiceOption] = &[ChoiceOption::new(0., "0"), ChoiceOption::new(1., "1")];

const THALASSEMIA: &[ChoiceOption] = &[
    ChoiceOption::new(0., "Normal"),
    ChoiceOption::new(1., "Fixed Defect"),
    ChoiceOption::new(2., "Reversible Defect"),
];

pub const DIABETES: &[FieldSpec] = &[
    FieldSpec::integer("Pregnancies", "Number of Pregnancies")
        .required()
        .column(0),
    FieldSpec::decimal("Glucose", "Glucose Level", 0.1)
        .required()
        .column(1),
    FieldSpec::decimal("BloodPressure", "Blood Pressure", 0.1)
        .required()
        .column(2),
    FieldSpec::decimal("SkinThickness", "Skin Thickness", 0.1)
        .required()
        .column(0),
    FieldSpec::decimal("Insulin", "Insulin Level", 0.1)
        .required()
        .column(1),
    FieldSpec::decimal("BMI", "BMI", 0.1).required().column(2),
    FieldSpec::decimal("DiabetesPedigreeFunction", "Diabetes Pedigree Function", 0.01)
        .required()
        .column(0),
    FieldSpec::integer("Age", "Age").required().column(1),
];

pub const HEART_DISEASE: &[FieldSpec] = &[
    FieldSpec::integer("age", "Age").min(0.).column(0),
    FieldSpec::choice("sex", "Sex", SEX).column(1),
    FieldSpec::choice("cp", "Chest Pain Type", CHEST_PAIN).column(2),
    FieldSpec::decimal("trestbps", "Resting Blood Pressure", 0.1).column(0),
    FieldSpec::decimal("chol", "Cholesterol", 0.1).column(1),
    FieldSpec::choice("fbs", "Fasting Blood Sugar > 120 mg/dl", BINARY).column(2),
    FieldSpec::integer("restecg", "Resting ECG").column(0),
    FieldSpec::decimal("thalach", "Max Heart Rate", 0.1).column(1),
    FieldSpec::choice("exang", "Exercise Induced Angina", BINARY).column(2),
    FieldSpec::decimal("oldpeak", "ST Depression", 0.01).column(0),
    FieldSpec::decimal("slope", "Slope of Peak Exercise ST Segment", 0.1).column(1),
    FieldSpec::decimal("maximum_heart_rate", "Maximum Heart Rate", 0.1)
        .min(0.)
        .column(2),
    FieldSpec::integer("ca", "Major Vessels").column(0),
    FieldSpec::choice("thal", "Thalassemia", THALASSEMIA).column(1),
];

const fn voice(key: &'static str, column: usize) -> FieldSpec {
    FieldSpec::decimal(key, key, 0.01).column(column)
}

/// Voice measurements, laid out round-robin over the columns.
pub const PARKINSONS: &[FieldSpec] = &[
    voice("MDVP:Fo(Hz)", 0),
    voice("MDVP:Fhi(Hz)", 1),
    voice("MDVP:Flo(Hz)", 2),
    voice("MDVP:Jitter(%)", 0),
    voice("MDVP:Jitter(Abs)", 1),
    voice("MDVP:RAP", 2),
    voice("MDVP:PPQ", 0),
    voice("Jitter:DDP", 1),
    voice("MDVP:Shimmer", 2),
    voice("MDVP:Shimmer(dB)", 0),
    voice("Shimmer:APQ3", 1),
    voice("Shimmer:APQ5", 2),
    voice("MDVP:APQ", 0),
    voice("Shimmer:DDA", 1),
    voice("NHR", 2),
    voice("HNR", 0),
    voice("RPDE", 1),
    voice("DFA", 2),
    voice("spread1", 0),
    voice("spread2", 1),
    voice("D2", 2),
    voice("PPE", 0),
];

/// Returns the fields of `fields` drawn in `column`, in form order.
pub fn in_column(fields: &[FieldSpec], column: usize) -> impl Iterator<Item = (usize, &FieldSpec)> {
    fields
        .iter()
        .enumerate()
        .filter(move |(_, f)| f.column == column)
}
