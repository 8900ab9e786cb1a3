//! The read-eval session.
//!
//! A [`Session`] maps variable names to ledgers and executes one command line
//! at a time. Every command either applies completely or reports a
//! [`CommandError`] and leaves all ledgers untouched.

use salesrepl_core::{parse_sale_date, Money, SaleId, SaleRecord, SalesDb, ValidationError};
use salesrepl_query::{parse, Command, Constructor, Method, MethodName};
use std::collections::HashMap;
use tracing::Dispatch;

use crate::error::CommandError;
use crate::export::{CsvExporter, Exporter};
use crate::help::HELP;
use crate::io::{InputError, LineInput, LineOutput};

/// Prompt shown before each command and each interactive field.
pub const PROMPT: &str = ">> ";

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting commands.
    Running,
    /// `exit` was issued or the input closed.
    Terminated,
}

/// Variables, lifecycle state and collaborators of one REPL run.
pub struct Session<O: LineOutput> {
    vars: HashMap<String, SalesDb>,
    state: SessionState,
    output: O,
    exporter: Box<dyn Exporter>,
    log: Option<Dispatch>,
}

impl<O: LineOutput> Session<O> {
    /// Create a running session with no variables, exporting to CSV.
    pub fn new(output: O) -> Self {
        Self {
            vars: HashMap::new(),
            state: SessionState::Running,
            output,
            exporter: Box::new(CsvExporter),
            log: None,
        }
    }

    /// Replace the collaborator used by `save(path)`.
    #[must_use]
    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    /// Route diagnostics of this session's commands to `dispatch`.
    #[must_use]
    pub fn with_logging(mut self, dispatch: Dispatch) -> Self {
        self.log = Some(dispatch);
        self
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session still accepts commands.
    pub const fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running)
    }

    /// The output collaborator.
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// The output collaborator, for writing lines outside of a command.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consume the session, returning its output collaborator.
    pub fn into_output(self) -> O {
        self.output
    }

    /// The ledger bound to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&SalesDb> {
        self.vars.get(name)
    }

    /// Stop the session. Only the first call announces it.
    pub fn terminate(&mut self) {
        if self.is_running() {
            self.state = SessionState::Terminated;
            self.output.write_line("Exiting REPL...");
        }
    }

    /// Read and run commands until the session terminates or `input` closes.
    ///
    /// Blank lines are skipped. Commands that prompt for fields read them from
    /// the same `input`. Only command lines are added to the input's history.
    pub fn run(&mut self, input: &mut dyn LineInput) {
        while self.is_running() {
            match input.read_line(PROMPT) {
                Ok(line) if line.trim().is_empty() => {}
                Ok(line) => {
                    input.add_history(line.trim());
                    self.run_line(&line, input);
                }
                Err(InputError::Interrupted | InputError::Eof) => self.terminate(),
                Err(err) => {
                    self.output.write_line(&format!("error: {err}"));
                    self.terminate();
                }
            }
        }
    }

    /// Run one command line and write its result, or its error, to the output.
    pub fn run_line(&mut self, raw: &str, input: &mut dyn LineInput) {
        match self.log.clone() {
            Some(dispatch) => {
                tracing::dispatcher::with_default(&dispatch, || self.report(raw, input));
            }
            None => self.report(raw, input),
        }
    }

    fn report(&mut self, raw: &str, input: &mut dyn LineInput) {
        match self.execute(raw, input) {
            Ok(Some(text)) => self.output.write_line(&text),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "command failed");
                self.output.write_line(&format!("error: {err}"));
                if err.is_fatal() {
                    self.terminate();
                }
            }
        }
    }

    /// Run one command line and return the text it produces.
    ///
    /// A method call is checked in this order: method name, variable,
    /// arguments. Nothing is written to the output except the announcements of
    /// `exit` and of interactive insertion.
    pub fn execute(
        &mut self,
        raw: &str,
        input: &mut dyn LineInput,
    ) -> Result<Option<String>, CommandError> {
        let command = parse(raw)?;
        tracing::debug!(?command, "parsed command");

        match command {
            Command::Comment => Ok(None),
            Command::Help => Ok(Some(HELP.to_string())),
            Command::Exit => {
                self.terminate();
                Ok(None)
            }
            Command::Assign {
                var,
                value: Constructor::SalesDb,
            } => {
                tracing::debug!(%var, "assigned empty ledger");
                self.vars.insert(var, SalesDb::new());
                Ok(None)
            }
            Command::Call { var, call } => {
                let name: MethodName = call
                    .name
                    .parse()
                    .map_err(|_| CommandError::InvalidCommand(raw.trim().to_string()))?;
                if !self.vars.contains_key(&var) {
                    return Err(CommandError::UnknownVariable(var));
                }
                let method = Method::bind(name, &call.args)?;
                tracing::debug!(%var, %name, "dispatching method");
                self.apply(&var, method, input)
            }
        }
    }

    fn apply(
        &mut self,
        var: &str,
        method: Method,
        input: &mut dyn LineInput,
    ) -> Result<Option<String>, CommandError> {
        let Self {
            vars,
            output,
            exporter,
            ..
        } = self;
        let db = vars
            .get_mut(var)
            .ok_or_else(|| CommandError::UnknownVariable(var.to_string()))?;

        let text = match method {
            Method::Insert => {
                let sale = read_sale(input, output)?;
                inserted(db.insert(sale))
            }
            Method::UnsafeInsert(sale) => inserted(db.insert(sale)),
            Method::View => db.view()?,
            Method::Remove(ids) => {
                let removed = db.remove(&ids)?;
                let mut lines = vec!["Successfully removed items:".to_string()];
                for (id, sale) in &removed {
                    lines.push(format!("{id}: {}", serde_json::to_string(sale)?));
                }
                lines.join("\n")
            }
            Method::Save(path) => {
                let rows = exporter
                    .export(db, &path)
                    .map_err(|source| CommandError::Export {
                        path: path.clone(),
                        source,
                    })?;
                format!("Saved {rows} sales to {}", path.display())
            }
            Method::ToUsd => {
                db.to_usd();
                return Ok(None);
            }
            Method::EmployeeOfTheMonth(period) => match db.employee_of_the_month(period) {
                Some(name) => format!("The employee of the month is {name}"),
                None => format!("Unable to retrieve employee of the month for {period}"),
            },
            Method::ProductOfTheMonth(period) => match db.product_of_the_month(period) {
                Some(name) => format!("The most sold product of the month is {name}"),
                None => {
                    format!("Unable to retrieve the most sold product of the month for {period}")
                }
            },
            Method::MonthSummary(period) => {
                let summary = db.month_summary(period);
                format!(
                    "{period} summary: {{ total: {:?}, mean: {:?} }}",
                    summary.total, summary.average
                )
            }
        };
        Ok(Some(text))
    }
}

fn inserted(id: SaleId) -> String {
    format!("Inserted sale with id {id}")
}

/// Prompt for every sale field in order. The first invalid field aborts.
fn read_sale(
    input: &mut dyn LineInput,
    output: &mut impl LineOutput,
) -> Result<SaleRecord, CommandError> {
    output.write_line("Starting interactive sale insertion...");

    let product_name = field(input, "product_name", "")?;
    let price = number(&field(input, "price", " (default BRL)")?)?;
    let quantity = integer("quantity", &field(input, "quantity", "")?)?;
    let client_id = integer("client_id", &field(input, "client_id", "")?)?;
    let employee_name = field(input, "employee_name", "")?;
    let date = parse_sale_date(field(input, "date", " (dd/mm/yyyy or dd-mm-yyyy)")?.trim())
        .map_err(CommandError::InsertAborted)?;
    let notes = field(input, "notes", "")?;

    Ok(SaleRecord {
        product_name,
        price: Money::Brl(price),
        quantity,
        client_id,
        employee_name,
        date,
        notes,
    })
}

fn field(input: &mut dyn LineInput, name: &str, hint: &str) -> Result<String, CommandError> {
    input
        .read_line(&format!("{PROMPT}{name}{hint}: "))
        .map_err(CommandError::Input)
}

fn number(text: &str) -> Result<f64, CommandError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or_else(|| invalid("price", text, "a number"))
}

fn integer(name: &'static str, text: &str) -> Result<i64, CommandError> {
    text.trim()
        .parse()
        .map_err(|_| invalid(name, text, "an integer"))
}

fn invalid(field: &'static str, value: &str, expected: &'static str) -> CommandError {
    CommandError::InsertAborted(ValidationError::InvalidField {
        field,
        value: value.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::ScriptedInput;

    fn session() -> Session<Vec<String>> {
        Session::new(Vec::new())
    }

    fn none() -> ScriptedInput {
        ScriptedInput::default()
    }

    /// Yields its lines, then reports Ctrl-C. Records history.
    struct TerminalInput {
        lines: ScriptedInput,
        history: Vec<String>,
    }

    impl TerminalInput {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: ScriptedInput::new(lines.iter().copied()),
                history: Vec::new(),
            }
        }
    }

    impl LineInput for TerminalInput {
        fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
            match self.lines.read_line(prompt) {
                Err(InputError::Eof) => Err(InputError::Interrupted),
                other => other,
            }
        }

        fn add_history(&mut self, line: &str) {
            self.history.push(line.to_string());
        }
    }

    #[test]
    fn test_comment_and_assignment() {
        let mut s = session();
        assert_eq!(s.execute("# nothing", &mut none()).unwrap(), None);
        assert_eq!(s.execute("x = SalesDB()", &mut none()).unwrap(), None);
        assert!(s.variable("x").unwrap().is_empty());
        assert_eq!(
            s.execute("x.view()", &mut none()).unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_reassignment_replaces_ledger() {
        let mut s = session();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        s.execute(
            "x._unsafe_insert('a', 1.0, 1, 1, 'A', '01/01/2000', '')",
            &mut none(),
        )
        .unwrap();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        assert!(s.variable("x").unwrap().is_empty());
    }

    #[test]
    fn test_check_order() {
        let mut s = session();
        // Unknown method wins over unknown variable.
        let err = s.execute("y.drop()", &mut none()).unwrap_err();
        assert!(matches!(err, CommandError::InvalidCommand(_)));

        // Unknown variable wins over bad arguments.
        let err = s.execute("y.month_summary(13)", &mut none()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);

        s.execute("y = SalesDB()", &mut none()).unwrap();
        let err = s.execute("y.month_summary(13)", &mut none()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_reports() {
        let mut s = session();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        assert_eq!(
            s.execute("x.employee_of_the_month(2, 2004)", &mut none())
                .unwrap()
                .as_deref(),
            Some("Unable to retrieve employee of the month for 2/2004")
        );
        assert_eq!(
            s.execute("x.month_summary(2, 2004)", &mut none())
                .unwrap()
                .as_deref(),
            Some("2/2004 summary: { total: 0.0, mean: 0.0 }")
        );
        s.execute(
            "x._unsafe_insert('orange', 4.0, 88, 111111111, 'Amanda', '06/05/1933', 'Fresh')",
            &mut none(),
        )
        .unwrap();
        s.execute(
            "x._unsafe_insert('mango', 6.0, 10, 81928319, 'Bob', '08/05/1933', 'Stale')",
            &mut none(),
        )
        .unwrap();
        assert_eq!(
            s.execute("x.product_of_the_month(5, 1933)", &mut none())
                .unwrap()
                .as_deref(),
            Some("The most sold product of the month is orange")
        );
        assert_eq!(
            s.execute("x.month_summary(5, 1933)", &mut none())
                .unwrap()
                .as_deref(),
            Some("5/1933 summary: { total: 412.0, mean: 206.0 }")
        );
    }

    #[test]
    fn test_remove_lists_removed_sales() {
        let mut s = session();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        s.execute(
            "x._unsafe_insert('pen', 2, 3, 7, 'Bob', '01-02-2003', '')",
            &mut none(),
        )
        .unwrap();
        let text = s.execute("x.remove(1)", &mut none()).unwrap().unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Successfully removed items:"));
        assert!(lines.next().unwrap().starts_with("1: {\"product_name\":\"pen\""));
        assert!(s.variable("x").unwrap().is_empty());
    }

    #[test]
    fn test_interactive_insert() {
        let mut s = session();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        let mut input = ScriptedInput::new([
            "keyboard",
            " 133.0 ",
            "1",
            "12873917239",
            "Amanda",
            "18/05/1933",
            "Black",
        ]);
        assert_eq!(
            s.execute("x.insert()", &mut input).unwrap().as_deref(),
            Some("Inserted sale with id 1")
        );
        let sale = s.variable("x").unwrap().get(SaleId::new(1)).unwrap();
        assert_eq!(sale.price, Money::Brl(133.0));
        assert_eq!(sale.client_id, 12_873_917_239);
        assert_eq!(
            s.output(),
            &vec!["Starting interactive sale insertion...".to_string()]
        );
    }

    #[test]
    fn test_interactive_insert_aborts_on_bad_field() {
        let mut s = session();
        s.execute("x = SalesDB()", &mut none()).unwrap();
        let mut input = ScriptedInput::new(["keyboard", "cheap", "unread"]);
        let err = s.execute("x.insert()", &mut input).unwrap_err();
        assert!(matches!(
            err,
            CommandError::InsertAborted(ValidationError::InvalidField { field: "price", .. })
        ));
        assert!(s.variable("x").unwrap().is_empty());
        assert!(!input.is_empty());
        assert!(s.is_running());
    }

    #[test]
    fn test_eof_during_insert_terminates() {
        let mut s = session();
        s.run_line("x = SalesDB()", &mut none());
        s.run_line("x.insert()", &mut ScriptedInput::new(["keyboard"]));
        assert_eq!(s.state(), SessionState::Terminated);
        assert!(s.variable("x").unwrap().is_empty());
        let out = s.into_output();
        assert_eq!(
            out,
            vec![
                "Starting interactive sale insertion...",
                "error: aborting insertion: end of input",
                "Exiting REPL...",
            ]
        );
    }

    #[test]
    fn test_interrupt_at_prompt_terminates() {
        let mut s = session();
        s.run(&mut TerminalInput::new(&["x = SalesDB()"]));
        assert_eq!(s.state(), SessionState::Terminated);
        assert!(s.variable("x").unwrap().is_empty());
        assert_eq!(s.into_output(), vec!["Exiting REPL..."]);
    }

    #[test]
    fn test_interrupt_during_insert_terminates() {
        let mut s = session();
        s.run(&mut TerminalInput::new(&["x = SalesDB()", "x.insert()", "pen"]));
        assert_eq!(s.state(), SessionState::Terminated);
        assert!(s.variable("x").unwrap().is_empty());
        assert_eq!(
            s.into_output(),
            vec![
                "Starting interactive sale insertion...",
                "error: aborting insertion: interrupted",
                "Exiting REPL...",
            ]
        );
    }

    #[test]
    fn test_history_records_commands_only() {
        let mut s = session();
        let mut input = TerminalInput::new(&[
            "  x = SalesDB() ",
            "",
            "x.insert()",
            "pen",
            "2.5",
            "3",
            "42",
            "Carla",
            "01/02/2003",
            "",
            "x.view()",
            "exit",
        ]);
        s.run(&mut input);
        assert_eq!(
            input.history,
            vec!["x = SalesDB()", "x.insert()", "x.view()", "exit"]
        );
        assert_eq!(s.variable("x").unwrap().len(), 1);
    }

    #[test]
    fn test_exit_is_idempotent() {
        let mut s = session();
        s.run_line("exit", &mut none());
        s.run_line("exit", &mut none());
        s.terminate();
        assert_eq!(s.output(), &vec!["Exiting REPL...".to_string()]);
    }

    #[test]
    fn test_run_until_exit() {
        let mut s = session();
        let mut input = ScriptedInput::new(["x = SalesDB()", "", "x.view()", "exit", "x.view()"]);
        s.run(&mut input);
        assert_eq!(s.output(), &vec!["{}".to_string(), "Exiting REPL...".to_string()]);
        assert!(!input.is_empty());
    }
}
