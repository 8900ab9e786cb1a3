//! Text printed by the `help` command.

/// Usage of the command language.
pub const HELP: &str = "\
Sales REPL: build and query in-memory sales ledgers.

Builtin commands:
    help    Show this message.
    exit    Leave the REPL (Ctrl-C and Ctrl-D also work).

Lines starting with '#' are comments and are ignored.

Variables hold sales databases and are created by assignment:
    >> x = SalesDB()
Assigning to an existing variable replaces it with an empty database.

Methods, called on a variable:
    view()
        Print every sale of the database as JSON.
            >> x.view()
    insert()
        Insert a new sale, asking for each field in turn. An invalid field
        aborts the insertion and nothing is stored.
            >> x.insert()
    remove(id, ...)
        Remove one or more sales by id. If any id is missing nothing is removed.
            >> x.remove(100)
            >> x.remove(4, 5, 9)
    save(path)
        Save the database to a CSV file.
            >> x.save('database.csv')
    to_usd()
        Convert every price to USD.
            >> x.to_usd()
    employee_of_the_month(month, year)
        Employee with the highest revenue in the given month.
            >> x.employee_of_the_month(5, 2023)
    product_of_the_month(month, year)
        Product sold most often in the given month.
            >> x.product_of_the_month(12, 2022)
    month_summary(month, year)
        Total and mean revenue of the given month.
            >> x.month_summary(4, 2020)
    _unsafe_insert(product_name, price, quantity, client_id, employee_name, date, notes)
        Insert a sale without prompting. Meant for scripts and tests.
            >> x._unsafe_insert('orange', 4.0, 88, 111111111, 'Amanda', '06/05/1933', 'Fresh')

Arguments are literals only: quoted strings, integers and decimal numbers.
Dates are written dd/mm/yyyy or dd-mm-yyyy. Prices are entered in BRL.";
