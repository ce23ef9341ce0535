/// The variable store shared by every line of a document.
///
/// A capacity-bounded association list from names to values. Lookup is a
/// linear scan with exact, case-sensitive matching; at calculator scale the
/// handful of entries makes anything cleverer pointless. Exceeding the
/// capacity is a caller contract violation and asserts rather than failing
/// softly.
#[derive(Debug, Clone)]
pub struct Context {
    entries:  Vec<(String, f64)>,
    capacity: usize,
}

impl Context {
    /// Creates an empty context holding at most `capacity` variables.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(),
               capacity }
    }

    /// Looks up the value bound to `name`, if any.
    ///
    /// ## Example
    /// ```
    /// use linecalc::Context;
    ///
    /// let mut context = Context::new(10);
    /// context.set("x", 4.0);
    /// context.set("x", 5.0);
    ///
    /// assert_eq!(context.get("x"), Some(5.0));
    /// assert_eq!(context.get("y"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|&(_, value)| value)
    }

    /// Binds `name` to `value`, overwriting an existing binding.
    ///
    /// # Panics
    /// Panics when a new binding would exceed the context's capacity.
    pub fn set(&mut self, name: &str, value: f64) {
        match self.entries.iter_mut().find(|(key, _)| key.as_str() == name) {
            Some(entry) => entry.1 = value,
            None => {
                assert!(self.entries.len() < self.capacity,
                        "variable context capacity exceeded");
                self.entries.push((name.to_string(), value));
            },
        }
    }
}
