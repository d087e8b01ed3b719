// There is no asynchronous job state: a generation row only exists once the
// model has answered, so it is written as completed.
#[derive(Debug)]
pub enum GenerationStatus {
    Completed,
}

impl GenerationStatus {
    pub fn value(&self) -> &str {
        match *self {
            Self::Completed => "completed",
        }
    }
}
