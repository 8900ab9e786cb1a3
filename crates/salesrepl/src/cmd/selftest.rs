//! Fixed command sequences that exercise the whole dispatcher.

use crate::io::{LineInput, LineOutput};
use crate::session::{Session, PROMPT};

/// Commands run by `--test`.
pub const SCRIPT: &[&str] = &[
    "x = SalesDB()",
    "x.view()",
    "x.employee_of_the_month(2, 2004)",
    "x.month_summary(2, 2004)",
    "x._unsafe_insert('orange', 4.0, 88, 111111111, 'Amanda', '06/05/1933', 'Fresh')",
    "x._unsafe_insert('mango', 6.0, 10, 81928319, 'Bob', '08/05/1933', 'Stale')",
    "x._unsafe_insert('keyboard', 133.0, 1, 12873917239, 'Amanda', '18/05/1933', 'Black')",
    "x.view()",
    "x.save('selftest.csv')",
    "x.employee_of_the_month(5, 1933)",
    "x.month_summary(5, 1933)",
    "x.product_of_the_month(5, 1933)",
    "x.to_usd()",
    "x.view()",
    "x.to_usd()",
    "x.view()",
    "x.remove(2)",
    "x.view()",
    "x._unsafe_insert('puzzle', 13, 4, 1939812039, 'Bob', '09/02/1950', 'hard puzzle')",
    "x.view()",
    "x.remove(1, 3)",
    "x.view()",
];

/// Commands run by `--test-interactive`; `insert()` prompts on the terminal.
pub const INTERACTIVE_SCRIPT: &[&str] = &["x = SalesDB()", "x.insert()", "x.view()"];

/// Echo and run each command of `script`, stopping early if the session ends.
pub fn run_script<O: LineOutput>(
    session: &mut Session<O>,
    script: &[&str],
    input: &mut dyn LineInput,
) {
    for line in script {
        if !session.is_running() {
            break;
        }
        session.output_mut().write_line(&format!("{PROMPT}{line}"));
        session.run_line(line, input);
    }
}
