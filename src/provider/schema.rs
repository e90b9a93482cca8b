/// How an attribute gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

/// A string attribute declared to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub mode: AttributeMode,
    pub sensitive: bool,
}

impl Attribute {
    pub const fn required(name: &'static str) -> Self {
        Attribute {
            name,
            mode: AttributeMode::Required,
            sensitive: false,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Attribute {
            name,
            mode: AttributeMode::Optional,
            sensitive: false,
        }
    }

    pub const fn computed(name: &'static str) -> Self {
        Attribute {
            name,
            mode: AttributeMode::Computed,
            sensitive: false,
        }
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Schema {
            attributes: attributes.into_iter().collect(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
