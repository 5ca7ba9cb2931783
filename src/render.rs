use slotbook_core::models::{
    notice::{Notice, NoticeKind},
    slot::{Slot, SlotTime},
};

pub fn format_time(time: &SlotTime) -> String {
    time.instant().format("%B %-d, %Y %I:%M %p UTC").to_string()
}

pub fn print_notice(notice: Option<&Notice>) {
    if let Some(notice) = notice {
        match notice.kind {
            NoticeKind::Success => println!("✅ {}", notice.text),
            NoticeKind::Error => eprintln!("❌ {}", notice.text),
        }
    }
}

pub fn print_slots(available: &[Slot], booked: &[Slot]) {
    println!("Available slots:");
    if available.is_empty() {
        println!("  No available slots at the moment. Please check back later.");
    }
    for slot in available {
        println!("  {}  ({})", format_time(&slot.start_time), slot.start_time);
    }

    if !booked.is_empty() {
        println!("Already booked:");
        for slot in booked {
            println!("  {} - Booked", format_time(&slot.start_time));
        }
    }
}
