use std::net::SocketAddr;

use crate::endpoints::GENERATE_PATH;

pub fn show_welcome_banner(addr: &SocketAddr) {
    let banner = format!(
        "{}{}{}",
        "\x1b[36m", // Cyan color start
        r"
   ___                       _     ___
  | _ \_ _ ___ _ __  _ __ | |_  | _ \_ _ _____ ___  _
  |  _/ '_/ _ \ '  \| '_ \|  _| |  _/ '_/ _ \ \ / || |
  |_| |_| \___/_|_|_| .__/ \__| |_| |_| \___/_\_\\_, |
                    |_|                          |__/",
        "\x1b[0m" // Reset color
    );

    let welcome_message = "\x1b[1mPrompt Proxy is up.\x1b[0m\n\nTry it out \
                           with this example request:";

    let curl_example = format!(
        "\x1b[0mcurl --request POST \\
  --url http://{addr}{GENERATE_PATH} \\
  --header 'Content-Type: application/json' \\
  --data '{{\"prompt\": \"hello world\"}}'\x1b[0m"
    );

    println!("{banner}\n\n{welcome_message}\n\n{curl_example}\n");
}
