use std::fmt;

/// A parameter.
///
/// This struct represents a `;name[=value]` parameter in a SIP URI or
/// header value. A flag parameter has an empty value.
///
/// # Examples
///
/// ```
/// use sipmsg::message::Param;
///
/// let param = Param::new("lr", "");
///
/// assert_eq!(param.to_string(), ";lr");
/// ```
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct Param {
    /// The parameter name.
    pub name: String,

    /// The parameter value, empty when absent.
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ";{}", self.name)?;
        if !self.value.is_empty() {
            write!(f, "={}", self.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Default, Clone)]
/// An ordered collection of SIP parameters.
///
/// Names are unique: inserting an existing name replaces its value
/// and keeps its original position.
pub struct Params(Vec<Param>);

impl Params {
    /// Creates an empty `Params` list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the parameter list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the value of a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|param| param.name == name)
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|param| param.name == name) {
            Some(param) => param.value = value,
            None => self.0.push(Param { name, value }),
        }
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.0.iter().position(|param| param.name == name)?;

        Some(self.0.remove(idx).value)
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.0.iter()
    }

    /// Appends every parameter of `other`, with [`Params::insert`] semantics.
    pub fn extend(&mut self, other: Params) {
        for Param { name, value } in other.0 {
            self.insert(name, value);
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in &self.0 {
            write!(f, "{}", param)?;
        }
        Ok(())
    }
}

impl<N, V, const L: usize> From<[(N, V); L]> for Params
where
    N: Into<String>,
    V: Into<String>,
{
    fn from(params: [(N, V); L]) -> Self {
        let mut out = Params::new();
        for (name, value) in params {
            out.insert(name, value);
        }
        out
    }
}
