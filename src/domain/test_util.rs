use anyhow::anyhow;

/// Connectivity represents the "connected" state of a faked driven port. A disconnected port
/// fails every call, which is how tests simulate the storage engine going away.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to the database!")),
        }
    }
}

/// FakeImplementation stands in for a single function on a mocked trait: it records the
/// arguments of every call and hands back a preconfigured result. Async trait methods don't
/// play well with the usual mocking crates, so mocks are assembled from these instead.
///
/// * [Args] is what gets captured on each call
/// * [Ret] is the function's return type
///
/// # Example
///
/// ```ignore
/// struct MockTodoPort {
///     delete_todo_result: FakeImplementation<i64, anyhow::Result<u64>>,
/// }
///
/// impl TodoPort for Mutex<MockTodoPort> {
///     async fn delete_todo(&self, todo_id: i64, ...) -> anyhow::Result<u64> {
///         let mut locked_self = self.lock().unwrap();
///         locked_self.delete_todo_result.save_arguments(todo_id);
///         locked_self.delete_todo_result.return_value_anyhow()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success> FakeImplementation<Args, anyhow::Result<Success>>
where
    Success: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked.
    /// [anyhow::Error] can't be cloned, so errors are stored and replayed by their message.
    pub fn set_returned_anyhow(&mut self, return_value: anyhow::Result<Success>) {
        match return_value {
            Ok(ok_result) => self.return_value = Some(Ok(ok_result)),
            Err(err) => self.return_value = Some(Err(anyhow!(format!("{}", err)))),
        }
    }

    /// Retrieve the configured result for this FakeImplementation
    pub fn return_value_anyhow(&self) -> anyhow::Result<Success> {
        match self.return_value {
            None => panic!("Tried to return from a function where the value wasn't set!"),
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(anyhow!(format!("{}", err))),
        }
    }
}
