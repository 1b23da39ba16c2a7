use std::io::{self, BufRead, Write};

use mollysql::{Session, StatementOutcome};

/// Reads statements from stdin until `quit`, `exit` or end of input. A
/// statement may span lines; it runs once a line ends with `;`.
pub fn cli(session: &mut Session) -> io::Result<()> {
    println!("Welcome to the mollysql shell");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut line_count = 1;
    let mut buffer = String::new();

    loop {
        if buffer.is_empty() {
            print!("({:03}) > ", line_count);
        } else {
            print!("({:03}) . ", line_count);
        }
        line_count += 1;
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if buffer.is_empty() && (input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")) {
            break;
        }
        if input.is_empty() {
            continue;
        }

        buffer.push_str(input);
        buffer.push('\n');
        if !input.ends_with(';') {
            continue;
        }

        for result in session.run_sql(&buffer) {
            match result {
                Ok(StatementOutcome::Query(rows)) => println!("{}", rows),
                Ok(StatementOutcome::Executed(result)) => match result.last_insert_id {
                    Some(id) => println!("OK, {} row(s) affected, last insert id {}", result.rows_affected, id),
                    None => println!("OK, {} row(s) affected", result.rows_affected),
                },
                Err(e) => println!("Error: {}", e),
            }
        }
        buffer.clear();
    }
    println!("Goodbye!");
    Ok(())
}
