use dialoguer::{Input, Password};

use super::CommandDefinition;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "login",
            "Sign in with any non-empty credentials",
            "login <user> <password>",
            cmd_login,
        ),
        CommandDefinition::new("logout", "End the current session", "logout", cmd_logout),
        CommandDefinition::new("whoami", "Show the signed-in user", "whoami", cmd_whoami),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (username, password) = match args {
        [user, password, ..] => (user.to_string(), password.to_string()),
        [] if context.mode() == CliMode::Interactive => {
            let user: String = Input::with_theme(&context.theme)
                .with_prompt("Username")
                .allow_empty(true)
                .interact_text()?;
            let password = Password::with_theme(&context.theme)
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?;
            (user, password)
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: login <user> <password>".into(),
            ))
        }
    };

    let user = context.store().login(&username, &password)?;
    context.cursor = None;
    output::success(format!("Welcome, {}.", user.name));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store().current_user()?.is_none() {
        output::info("Nobody is logged in.");
        return Ok(());
    }
    context.store().logout()?;
    context.cursor = None;
    output::success("Logged out.");
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.store().current_user()? {
        Some(user) => output::info(format!("{} ({})", user.name, user.username)),
        None => output::info("Not logged in."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::tests::script_context;

    #[test]
    fn login_and_logout_update_the_session() {
        let mut context = script_context();
        cmd_login(&mut context, &["admin", "secret"]).unwrap();
        assert_eq!(context.require_user().unwrap().username, "admin");

        cmd_logout(&mut context, &[]).unwrap();
        assert!(context.store().current_user().unwrap().is_none());
    }

    #[test]
    fn login_needs_both_credentials_in_script_mode() {
        let mut context = script_context();
        assert!(matches!(
            cmd_login(&mut context, &["admin"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            cmd_login(&mut context, &["admin", ""]),
            Err(CommandError::Ledger(_))
        ));
        assert!(context.store().current_user().unwrap().is_none());
    }
}
