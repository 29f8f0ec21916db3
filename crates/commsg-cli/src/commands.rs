//! Subcommands.

use clap::{Subcommand, ValueEnum};
use commsg_client::{
    ApiResult, Client, MessageBody, MsgType, PageQuery, Params, PushRequest, ReadFilter, SetRead,
};
use std::str::FromStr;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Push a message to one or more IM accounts
    Push {
        /// Sender IM account
        #[arg(long = "from")]
        sender: String,
        /// Recipient IM account (repeatable)
        #[arg(long = "to", required = true)]
        recipients: Vec<String>,
        /// Message text
        #[arg(long)]
        content: String,
        /// Extra message body fields as a JSON object
        #[arg(long, value_parser = parse_object)]
        body: Option<Params>,
        /// M0000 system, M0001 direct, M0002 group, M0003 operation, M9999 heartbeat;
        /// other codes are sent as given
        #[arg(long, default_value_t = MsgType::System, value_parser = MsgType::from_str)]
        msg_type: MsgType,
        #[arg(long, default_value = "")]
        custom_type: String,
        /// Custom data as a JSON object
        #[arg(long, value_parser = parse_object)]
        custom_data: Option<Params>,
        #[arg(long, default_value = commsg_core::DEFAULT_SOURCE)]
        source: String,
        /// Sender IM password (server default when omitted)
        #[arg(long, env = "COMMSG_SENDER_PASSWORD", default_value = "")]
        password: String,
        /// Raw parameters merged over the generated ones, as a JSON object
        #[arg(long, value_parser = parse_object)]
        extra: Option<Params>,
    },
    /// List messages
    Page {
        /// Last message id already seen (0 for newest)
        #[arg(long, default_value_t = 0)]
        last_id: u64,
        #[arg(long)]
        friend: Option<String>,
        #[arg(long)]
        custom_type: Option<String>,
        #[arg(long, value_parser = MsgType::from_str)]
        msg_type: Option<MsgType>,
        #[arg(long, value_enum)]
        read: Option<ReadArg>,
        #[arg(long, default_value_t = commsg_core::DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Mark messages read (all messages when no ids are given)
    SetRead { ids: Vec<u64> },
    /// Show one message
    Detail { id: u64 },
    /// List contacts
    Contacts,
    /// Contacts with message statistics
    Stats,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReadArg {
    Unread,
    Read,
}

impl From<ReadArg> for ReadFilter {
    fn from(arg: ReadArg) -> Self {
        match arg {
            ReadArg::Unread => ReadFilter::Unread,
            ReadArg::Read => ReadFilter::Read,
        }
    }
}

pub async fn run(client: &Client, command: Command) -> ApiResult {
    match command {
        Command::Push {
            sender,
            recipients,
            content,
            body,
            msg_type,
            custom_type,
            custom_data,
            source,
            password,
            extra,
        } => {
            let body = MessageBody {
                content,
                extra: body.unwrap_or_default(),
            };
            let request = PushRequest::new(sender, recipients, body)
                .msg_type(msg_type)
                .custom_type(custom_type)
                .custom_data(custom_data.unwrap_or_default())
                .source(source)
                .sender_password(password)
                .extra(extra.unwrap_or_default());
            client.push(request).await
        }
        Command::Page {
            last_id,
            friend,
            custom_type,
            msg_type,
            read,
            page_size,
        } => {
            let query = PageQuery {
                friend_account: friend,
                custom_type,
                msg_type,
                read: read.map(ReadFilter::from).unwrap_or_default(),
                ..PageQuery::new(last_id).page_size(page_size)
            };
            client.page(query).await
        }
        Command::SetRead { ids } => client.set_read(SetRead::ids(ids)).await,
        Command::Detail { id } => client.detail(id).await,
        Command::Contacts => client.contact_all().await,
        Command::Stats => client.contact_msg_statistics().await,
    }
}

fn parse_object(s: &str) -> Result<Params, String> {
    match serde_json::from_str(s) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    fn push_msg_type(args: &[&str]) -> MsgType {
        let base = ["commsg", "push", "--from", "admin", "--to", "u1", "--content", "hi"];
        let cli = Cli::try_parse_from(base.iter().chain(args)).unwrap();
        match cli.command {
            Command::Push { msg_type, .. } => msg_type,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn msg_type_flag_accepts_names_codes_and_custom_codes() {
        assert_eq!(push_msg_type(&[]), MsgType::System);
        assert_eq!(push_msg_type(&["--msg-type", "direct"]), MsgType::Direct);
        assert_eq!(push_msg_type(&["--msg-type", "M0002"]), MsgType::Group);
        assert_eq!(
            push_msg_type(&["--msg-type", "M7001"]),
            MsgType::Other("M7001".to_string())
        );

        let cli = Cli::try_parse_from(["commsg", "page", "--msg-type", "M7001"]).unwrap();
        match cli.command {
            Command::Page { msg_type, .. } => {
                assert_eq!(msg_type, Some(MsgType::Other("M7001".to_string())))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_object_accepts_only_objects() {
        let map = parse_object(r#"{"orderId": 7}"#).unwrap();
        assert_eq!(map["orderId"], 7);
        assert!(parse_object("[1, 2]").is_err());
        assert!(parse_object("{").is_err());
    }

    #[test]
    fn read_arg_maps_to_filter() {
        assert_eq!(ReadFilter::from(ReadArg::Unread), ReadFilter::Unread);
        assert_eq!(ReadFilter::from(ReadArg::Read), ReadFilter::Read);
    }
}
