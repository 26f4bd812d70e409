//! Demo workspace: two phone numbers and two conversations.

use crate::domain::conversation::Conversation;
use crate::domain::message::{MediaFile, MediaKind, Message, MessageDirection, MessageStatus};
use crate::domain::phone_number::PhoneNumber;
use time::{Duration, OffsetDateTime};

struct SeedMessage {
    direction: MessageDirection,
    status: MessageStatus,
    minutes_ago: i64,
    content: &'static str,
    media: Option<(&'static str, &'static str, MediaKind, &'static str)>,
}

const fn inbound(minutes_ago: i64, content: &'static str) -> SeedMessage {
    SeedMessage {
        direction: MessageDirection::Inbound,
        status: MessageStatus::Delivered,
        minutes_ago,
        content,
        media: None,
    }
}

const fn outbound(minutes_ago: i64, status: MessageStatus, content: &'static str) -> SeedMessage {
    SeedMessage { direction: MessageDirection::Outbound, status, minutes_ago, content, media: None }
}

const fn with_media(
    mut message: SeedMessage,
    id: &'static str,
    name: &'static str,
    kind: MediaKind,
    size_label: &'static str,
) -> SeedMessage {
    message.media = Some((id, name, kind, size_label));
    message
}

const ACME: [SeedMessage; 12] = [
    inbound(95, "Need an ETA update for shipment #4438."),
    outbound(92, MessageStatus::Sent, "Checking now. I will send a full update shortly."),
    inbound(86, "Thanks. Customer is asking for a delivery window."),
    with_media(
        outbound(80, MessageStatus::Sent, "Current estimate is 3:30-4:15 PM local."),
        "media-01",
        "delivery-window.png",
        MediaKind::Image,
        "328 KB",
    ),
    inbound(75, "Perfect, forwarding that now."),
    outbound(72, MessageStatus::Sent, "If anything shifts, I will notify you immediately."),
    inbound(66, "Can you share POD once delivered?"),
    with_media(
        outbound(63, MessageStatus::Sent, "Yes, we will send POD right after drop-off."),
        "media-02",
        "pod-template.pdf",
        MediaKind::Document,
        "1.2 MB",
    ),
    inbound(55, "Great, appreciate the fast turnaround."),
    outbound(51, MessageStatus::Failed, "No problem, we are tracking it in real time."),
    inbound(28, "Driver just arrived. Looks on schedule."),
    with_media(
        outbound(24, MessageStatus::Sent, "Confirmed on our side too."),
        "media-03",
        "dropoff-proof.jpg",
        MediaKind::Image,
        "441 KB",
    ),
];

const NORTHWIND: [SeedMessage; 6] = [
    inbound(180, "Can we schedule a product demo this week?"),
    outbound(172, MessageStatus::Sent, "Yes. We have openings Wednesday or Thursday afternoon."),
    inbound(166, "Thursday at 2 PM works for us."),
    with_media(
        outbound(160, MessageStatus::Sent, "Booked. Sending calendar invite now."),
        "media-04",
        "demo-walkthrough.mp4",
        MediaKind::Video,
        "8.4 MB",
    ),
    inbound(151, "Invite received, thank you."),
    outbound(145, MessageStatus::Pending, "See you then. We will walk through messaging flows."),
];

fn build_conversation(
    id: &str,
    phone: &PhoneNumber,
    title: &str,
    counterparty: &str,
    seeds: &[SeedMessage],
    now: OffsetDateTime,
) -> Conversation {
    let messages = seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| Message {
            id: format!("{id}-msg-{:02}", i + 1),
            conversation_id: id.to_string(),
            user_id: phone.user_id.clone(),
            direction: seed.direction,
            status: seed.status,
            media_files: seed
                .media
                .map(|(id, name, kind, size_label)| MediaFile {
                    id: id.to_string(),
                    name: name.to_string(),
                    kind,
                    size_label: size_label.to_string(),
                })
                .into_iter()
                .collect(),
            from_number: match seed.direction {
                MessageDirection::Inbound => counterparty.to_string(),
                MessageDirection::Outbound => phone.phone.clone(),
            },
            content: seed.content.to_string(),
            created_at: now - Duration::minutes(seed.minutes_ago),
        })
        .collect();

    Conversation {
        id: id.to_string(),
        phone_number_id: phone.id.clone(),
        user_id: phone.user_id.clone(),
        title: title.to_string(),
        counterparty_number: counterparty.to_string(),
        messages,
    }
}

#[must_use]
pub fn demo_data(user_id: &str, now: OffsetDateTime) -> (Vec<PhoneNumber>, Vec<Conversation>) {
    let phone = |id: &str, name: &str, number: &str, minutes_ago: i64| PhoneNumber {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        phone: number.to_string(),
        created_at: now - Duration::minutes(minutes_ago),
    };

    let support = phone("phone-01", "Primary Support", "+13125550100", 600);
    let sales = phone("phone-02", "Sales Line", "+13125550177", 590);

    let conversations = vec![
        build_conversation("conversation-01", &support, "Acme Logistics", "+14155550189", &ACME, now),
        build_conversation("conversation-02", &sales, "Northwind Retail", "+15035550088", &NORTHWIND, now),
    ];

    (vec![support, sales], conversations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data_shape() {
        let now = OffsetDateTime::now_utc();
        let (phones, conversations) = demo_data("u1", now);

        assert_eq!(phones.len(), 2);
        assert_eq!(conversations[0].messages.len(), 12);
        assert_eq!(conversations[1].messages.len(), 6);
        assert_eq!(conversations[0].messages[3].media_files[0].name, "delivery-window.png");
        assert_eq!(conversations[0].messages[1].from_number, "+13125550100");
        assert_eq!(conversations[0].latest_message().map(|m| m.id.as_str()), Some("conversation-01-msg-12"));
        assert_eq!(conversations[0].sent_media().len(), 3);
    }
}
