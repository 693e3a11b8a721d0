use htmlparity::command_argument_builder;
use htmlparity::handlers::{handle_check, handle_normalize, init_tracing, print_banner};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    // quiet and verbose are global, so the subcommand's matches carry them
    let Some((name, primary_command)) = chosen_command.subcommand() else {
        unreachable!("clap should ensure we don't get here")
    };
    init_tracing(primary_command.get_flag("verbose"));

    match name {
        "check" => {
            if !primary_command.get_flag("quiet") {
                print_banner();
            }
            handle_check(primary_command).await
        }
        "normalize" => handle_normalize(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
