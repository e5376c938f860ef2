use uuid::Uuid;

/// Source of fresh ids for pasted widgets and newly created aliases.
pub trait IdGenerator {
    fn new_id(&mut self) -> String;
}

/// Random v4 UUIDs, the ids dashboards use everywhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn new_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`{prefix}-1`, `{prefix}-2`, ...), for tests and reproducible output.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_unique_and_parse() {
        let mut ids = UuidIds;
        let a = ids.new_id();
        let b = ids.new_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new("alias");
        assert_eq!(ids.new_id(), "alias-1");
        assert_eq!(ids.new_id(), "alias-2");
    }
}
