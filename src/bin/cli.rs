use gambit::board::{Board, Color, Position};
use gambit::error::{EngineError, EngineResult};
use gambit::logger;
use gambit::moves::types::Move;
use gambit::square::Square;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::info;

struct Command {
    name: &'static str,
    shortcut: &'static str,
    help: &'static str,
}

// Declaration order is dispatch order: `t` resolves to think, not test.
const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        shortcut: "h",
        help: "Print this help.",
    },
    Command {
        name: "quit",
        shortcut: "q",
        help: "Exit the application.",
    },
    Command {
        name: "print",
        shortcut: "p",
        help: "Print the chess board.",
    },
    Command {
        name: "reset",
        shortcut: "r",
        help: "Reset the board to its initial state.",
    },
    Command {
        name: "moves",
        shortcut: "",
        help: "List moves for the side to move, or from one square.",
    },
    Command {
        name: "move",
        shortcut: "m",
        help: "Play a move by text (D2-D4) or by number from the last listing.",
    },
    Command {
        name: "undo",
        shortcut: "u",
        help: "Take back the last move.",
    },
    Command {
        name: "evaluate",
        shortcut: "e",
        help: "Print the static evaluation of the position.",
    },
    Command {
        name: "think",
        shortcut: "t",
        help: "Search for the best move (optional depth, default 4).",
    },
    Command {
        name: "fen",
        shortcut: "f",
        help: "Print the position as FEN, or load one.",
    },
    Command {
        name: "test",
        shortcut: "t",
        help: "Run the built-in smoke tests.",
    },
];

fn resolve(token: &str) -> Option<&'static Command> {
    COMMANDS
        .iter()
        .find(|c| c.name == token || c.shortcut == token)
        .or_else(|| COMMANDS.iter().find(|c| c.name.starts_with(token)))
}

fn print_help() {
    for c in COMMANDS {
        println!("{:<10}{}", c.name, c.help);
    }
}

fn main() {
    // Logging is best-effort; a REPL without a log file still works.
    let log_path = std::env::args().nth(1);
    let _log_guard = logger::init(log_path.as_deref()).ok();
    info!("repl started");

    let mut board = Board::new();
    let mut last_moves: Vec<Move> = Vec::new();

    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(token) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();
        let Some(cmd) = resolve(token) else {
            println!("Unknown command: {}", token);
            continue;
        };
        if cmd.name == "quit" {
            break;
        }
        if let Err(e) = run_command(cmd.name, &args, &mut board, &mut last_moves) {
            println!("Error: {}", e);
        }
    }
    info!("repl stopped");
}

fn run_command(
    name: &str,
    args: &[&str],
    board: &mut Board,
    last_moves: &mut Vec<Move>,
) -> EngineResult<()> {
    match name {
        "help" => print_help(),
        "print" => print!("{}", render(board.current())),
        "reset" => board.reset(),
        "moves" => list_moves(board, args.first().copied(), last_moves)?,
        "move" => match args.first().copied() {
            None | Some("-") => list_moves(board, None, last_moves)?,
            Some(arg) => {
                if let Ok(n) = arg.parse::<usize>() {
                    let mv = *last_moves
                        .get(n.wrapping_sub(1))
                        .ok_or(EngineError::InvalidMove)?;
                    board.make_move(&mv)?;
                } else {
                    board.make_move_text(arg)?;
                }
            }
        },
        "undo" => board.undo()?,
        "evaluate" => println!("{}", board.evaluate()),
        "think" => {
            let depth = args.first().and_then(|a| a.parse().ok()).unwrap_or(4);
            board.think(depth, |mv, d, score| println!("{}. {}: {}", d, mv, score))?;
        }
        "fen" => {
            if args.is_empty() {
                println!("{}", board.fen());
            } else {
                board.load_fen(&args.join(" "))?;
            }
        }
        "test" => run_self_tests(),
        _ => {}
    }
    Ok(())
}

fn list_moves(board: &Board, square: Option<&str>, last_moves: &mut Vec<Move>) -> EngineResult<()> {
    let moves = match square {
        Some(text) => board.get_moves_from(Square::from_str(text)?)?,
        None => board.get_moves(),
    };
    for (i, mv) in moves.iter().enumerate() {
        println!("{}. {}", i + 1, mv);
    }
    *last_moves = moves;
    Ok(())
}

// 5x3-character sprites, eight per row: the two checkerboard backgrounds,
// then pawn, rook, knight, bishop, queen, king. Rows 0..3 are the black set,
// rows 3..6 the white set with `#` markers.
const SPRITE_WIDTH: usize = 5;
const SPRITE_LINES: usize = 3;
const SPRITE_ROWS: [&str; 6] = [
    r"     :::::                      +  \\^//",
    r"     :::::  _   III  ,o/  [ ]  ( )  ,o/ ",
    r"     :::::_(_)__[_]__[_]__(_)_[___](___)",
    r"     :::::                      +  \\^//",
    r"     :::::  _   III  ,o/  [ ]  ( )  ,o/ ",
    r"     :::::_(#)__[#]__[#]__(#)_[_#_](_#_)",
];

fn render(pos: &Position) -> String {
    let mut out = String::new();
    for y in (0..8i8).rev() {
        for line in 0..SPRITE_LINES {
            for x in 0..8i8 {
                let piece = pos.get(Square::new(x, y));
                let sprite = match piece.kind() {
                    None => ((x + y) % 2) as usize,
                    Some(kind) => kind as usize + 1,
                };
                let row = match piece.color() {
                    Some(Color::White) => line + SPRITE_LINES,
                    _ => line,
                };
                let start = sprite * SPRITE_WIDTH;
                out.push_str(&SPRITE_ROWS[row][start..start + SPRITE_WIDTH]);
            }
            out.push('\n');
        }
    }
    out
}

fn run_self_tests() {
    println!("Running engine smoke tests...");
    println!("----------------------------------------------------");
    let mut passed = 0u32;
    let mut total = 0u32;
    let mut check = |name: &str, ok: bool| {
        total += 1;
        let verdict = if ok {
            passed += 1;
            "PASS"
        } else {
            "FAIL"
        };
        println!("Test #{}: {} - {}", total, verdict, name);
    };

    let mut board = Board::new();
    check(
        "start position has twenty moves",
        board.get_moves().len() == 20,
    );
    check(
        "illegal pawn move is rejected",
        board.make_move_text("A2-A5") == Err(EngineError::InvalidMove),
    );
    check(
        "empty-board FEN round-trips",
        board.load_fen("8/8/8/8/8/8/8/8 b").is_ok() && board.fen() == "8/8/8/8/8/8/8/8 b",
    );

    let mut board = Board::new();
    let hash_ok = board.make_move_text("A2-A4").is_ok()
        && board.current().hash() == board.current().compute_hash_full();
    check("hash stays consistent after a move", hash_ok);

    let mut board = Board::new();
    let bare_ok = board.load_fen("K7/8/8/8/8/8/8/k7 w").is_ok() && board.evaluate() == 0;
    check("bare kings evaluate to zero", bare_ok);

    drop(check);
    println!("----------------------------------------------------");
    println!("Result: {}/{} passed", passed, total);
}
