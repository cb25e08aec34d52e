//! Environment variable store.
//!
//! Names are case-sensitive. Enumeration follows insertion order, which is
//! what `set` prints.

/// Ordered name -> value map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(String, String)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default variables derived from the session identity.
    pub fn with_defaults(user_name: &str, computer_name: &str) -> Self {
        let temp = format!("C:\\Users\\{}\\AppData\\Local\\Temp", user_name);
        let mut env = Self::new();
        env.set("PATH", "C:\\Windows\\system32;C:\\Windows");
        env.set("USERNAME", user_name);
        env.set("COMPUTERNAME", computer_name);
        env.set("OS", "Windows_NT");
        env.set("PROCESSOR_ARCHITECTURE", "x86");
        env.set("NUMBER_OF_PROCESSORS", "1");
        env.set("WINDIR", "C:\\Windows");
        env.set("SYSTEMROOT", "C:\\Windows");
        env.set("TEMP", &temp);
        env.set("TMP", &temp);
        env
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Bind or overwrite. An overwritten variable keeps its position.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.vars.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.vars.push((name.to_string(), value.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
