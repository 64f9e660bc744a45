//! The built-in Ho Chi Minh City metro network.
//!
//! Every segment takes 3 minutes. Interchanges cost 7 minutes to change
//! line in the peak and 5 off-peak. All lines run 06:00 to 22:00 with
//! 10-minute peak and 15-minute off-peak headways.

use chrono::Weekday;

use super::NetworkFile;
use crate::domain::{ClockTime, Minutes, TimeWindow};
use crate::timetable::{EarlyMorning, ExpressService, LateService, LineSchedule, WeekendNight};
use crate::topology::{LineRecord, SegmentRecord, StationRecord, TransferRecord};

const TRAVEL_MINUTES: Minutes = 3;
const TRANSFER_PEAK_MINUTES: Minutes = 7;
const TRANSFER_OFF_PEAK_MINUTES: Minutes = 5;

/// (code, name)
const STATIONS: &[(&str, &str)] = &[
    ("S101MD", "Mien Dong"),
    ("S102STAP", "Suoi Tien Amusement Park"),
    ("S103SHTP", "Saigon Hi-tech Park"),
    ("S104TD", "Thu Duc"),
    ("S105BT", "Binh Thai"),
    ("S106PL", "Phuoc Long"),
    ("S107RC", "Rach Chiec"),
    ("S108AP", "Anphu"),
    ("S109TD", "Thao Dien"),
    ("S110SB", "Saigon Bridge"),
    ("S111VT", "Van Thanh"),
    ("S112BS", "Ba Son"),
    ("S113OH", "Opera House"),
    ("S114BT", "Ben Thanh"),
    ("S201CC", "Cu Chi"),
    ("S202AS", "An Suong"),
    ("S203TTN", "Tan Thoi Nhat"),
    ("S204TB", "Tan Binh"),
    ("S205PVB", "Pham Van Bach"),
    ("S206BQ", "Ba Queo"),
    ("S207NHD", "Nguyen Hong Dao"),
    ("S208BH", "Bay Hien"),
    ("S209PVH", "Pham Van Hai"),
    ("S210LTRP", "Le Thi Rieng Park"),
    ("S211HH", "Hoa Hung"),
    ("S212DC", "Dan Chu"),
    ("S213TD", "Tao Dan"),
    ("S214HN", "Ham Nghi"),
    ("S215TTS", "Thu Thiem Square"),
    ("S216MCT", "Mai Chi Tho"),
    ("S217TN", "Tran Nao"),
    ("S218BK", "Binh Khanh"),
    ("S219TT", "Thu Thiem"),
    ("S301TK", "Tan Kien"),
    ("S302EBS", "Eastern Bus Station"),
    ("S303PLP", "Phu Lam Park"),
    ("S304PL", "Phu Lam"),
    ("S305CG", "Cay Go"),
    ("S306CL", "Cho Lon"),
    ("S307TKP", "Thuan Kieu Plaza"),
    ("S308UMP", "University of Meds and Pharma"),
    ("S309HBP", "Hoa Binh Park"),
    ("S310CH", "Cong Hoa"),
    ("S311TB", "Thai Binh"),
    ("S351DA", "Di An"),
    ("S352GAB", "Ga An Binh"),
    ("S353TB", "Tam Binh"),
    ("S354HBP", "Hiep Binh Phuoc"),
    ("S355BT", "Binh Trieu"),
    ("S356XVNT", "Xo Viet Nghe Tinh"),
    ("S357HX", "Hang Xanh"),
    ("S358NCV", "Nguyen Cuu Van"),
    ("S359SZ", "Saigon Zoo"),
    ("S360HL", "Hoa Lu"),
    ("S361TL", "Turtle Lake"),
    ("S362IP", "Independence Palace"),
    ("S401TX", "Thanh Xuan"),
    ("S402NTG", "Nga Tu Ga"),
    ("S403ALB", "An Loc Bridge"),
    ("S404AN", "An Nhon"),
    ("S405NVL", "Nguyen Van Luong"),
    ("S406GV", "Go Vap"),
    ("S407175H", "175 Hospital"),
    ("S408GDP", "Gia Dinh Park"),
    ("S409PN", "Phu Nhuan"),
    ("S410KB", "Kieu Bridge"),
    ("S411LVTP", "Le Van Tam Park"),
    ("S412OLB", "Ong Lanh Bridge"),
    ("S413YS", "Yersin"),
    ("S414KH", "Khanh Hoa"),
    ("S415TH", "Tan Hung"),
    ("S416NHT", "Nguyen Huu Tho"),
    ("S417NVL", "Nguyen Van Linh"),
    ("S418PK", "Phuoc Kien"),
    ("S419PHL", "Pham Huu Lau"),
    ("S420BC", "Ba Chiem"),
    ("S421LT", "Long Thoi"),
    ("S422HP", "Hiep Phuoc"),
    ("S451TSN", "Tan Son Nhat"),
    ("S452LCC", "Lang Cha Ca"),
    ("S461HVTP", "Hoang Van Thu Park"),
    ("S501BC", "Ba Chieu"),
    ("S502NVD", "Nguyen Van Dau"),
    ("S503TBM", "Tan Binh Market"),
    ("S504BH", "Bac Hai"),
    ("S505HUT", "HCMC Uni of Tech"),
    ("S506PT", "Phu Tho"),
    ("S507XC", "Xom Cui"),
    ("S508D8BS", "District 8 Bus Station"),
    ("S509BH", "Binh Hung"),
    ("S510CG", "Can Giuoc"),
    ("S601AC", "Au Co"),
    ("S602VL", "Vuon Lai"),
    ("S603TP", "Tan Phu"),
    ("S604HB", "Hoa Binh"),
    ("S605LBB", "Luy Ban Bich"),
    ("M201TD", "Thanh Da"),
    ("M202BA", "Binh An"),
    ("M203LDC", "Luong Dinh Cua"),
    ("M204STT", "South Thu Thiem"),
    ("M205HTP", "Huynh Tan Phat"),
    ("M206TTT", "Tan Thuan Tay"),
    ("M207NTT", "Nguyen Thi Thap"),
    ("M208PMH", "Phu My Hung"),
    ("M209NDC", "Nguyen Duc Canh"),
    ("M210RMIT", "RMIT"),
    ("M211COB", "Cau Ong Be"),
    ("M212PH", "Pham Hung"),
    ("M213RHA", "Rach Hiep An"),
    ("M301TCH", "Tan Chanh Hiep"),
    ("M302QTSC", "Quang Trung Software City"),
    ("M303PHI", "Phan Huy Ich"),
    ("M304TS", "Tan Son"),
    ("M305HTT", "Hanh Thong Tay"),
    ("M306TN", "Thong Nhat"),
    ("M307XT", "Xom Thuoc"),
];

/// Lines as (code, ordered station codes). The code doubles as display name.
const LINES: &[(&str, &[&str])] = &[
    (
        "Line 1",
        &[
            "S101MD", "S102STAP", "S103SHTP", "S104TD", "S105BT", "S106PL", "S107RC", "S108AP",
            "S109TD", "S110SB", "S111VT", "S112BS", "S113OH", "S114BT",
        ],
    ),
    (
        "Line 2",
        &[
            "S201CC", "S202AS", "S203TTN", "S204TB", "S205PVB", "S206BQ", "S207NHD", "S208BH",
            "S209PVH", "S210LTRP", "S211HH", "S212DC", "S213TD", "S114BT", "S214HN", "S215TTS",
            "S216MCT", "S217TN", "S218BK", "S219TT",
        ],
    ),
    (
        "Line 3A",
        &[
            "S301TK", "S302EBS", "S303PLP", "S304PL", "S305CG", "S306CL", "S307TKP", "S308UMP",
            "S309HBP", "S310CH", "S311TB", "S114BT",
        ],
    ),
    (
        "Line 3B",
        &[
            "S351DA", "S352GAB", "S353TB", "S354HBP", "S355BT", "S356XVNT", "S357HX", "S358NCV",
            "S359SZ", "S360HL", "S361TL", "S362IP", "S213TD", "S310CH",
        ],
    ),
    (
        "Line 4",
        &[
            "S401TX", "S402NTG", "S403ALB", "S404AN", "S405NVL", "S406GV", "S407175H", "S408GDP",
            "S409PN", "S410KB", "S411LVTP", "S361TL", "S114BT", "S412OLB", "S413YS", "S414KH",
            "S415TH", "S416NHT", "S417NVL", "S418PK", "S419PHL", "S420BC", "S421LT", "S422HP",
        ],
    ),
    ("Line 4B", &["S408GDP", "S451TSN", "S452LCC"]),
    ("Line 4B1", &["S451TSN", "S461HVTP"]),
    (
        "Line 5",
        &[
            "S110SB", "S357HX", "S501BC", "S502NVD", "S409PN", "S461HVTP", "S452LCC", "S208BH",
            "S503TBM", "S504BH", "S505HUT", "S506PT", "S308UMP", "S507XC", "S508D8BS", "S509BH",
            "S510CG",
        ],
    ),
    (
        "Line 6",
        &["S206BQ", "S601AC", "S602VL", "S603TP", "S604HB", "S605LBB", "S304PL"],
    ),
    (
        "MR2",
        &[
            "M201TD", "S109TD", "M202BA", "M203LDC", "S217TN", "M204STT", "M205HTP", "M206TTT",
            "M207NTT", "M208PMH", "M209NDC", "S417NVL", "M210RMIT", "M211COB", "M212PH",
            "M213RHA", "S509BH",
        ],
    ),
    (
        "MR3",
        &[
            "M301TCH", "M302QTSC", "M303PHI", "M304TS", "M305HTT", "M306TN", "M307XT", "S406GV",
        ],
    ),
];

/// Interchange stations and the lines that meet there.
const INTERCHANGES: &[(&str, &[&str])] = &[
    ("S114BT", &["Line 1", "Line 2", "Line 3A", "Line 4"]),
    ("S109TD", &["Line 1", "MR2"]),
    ("S110SB", &["Line 1", "Line 5"]),
    ("S208BH", &["Line 2", "Line 5"]),
    ("S357HX", &["Line 3B", "Line 5"]),
    ("S409PN", &["Line 4", "Line 5"]),
    ("S461HVTP", &["Line 4B1", "Line 5"]),
    ("S452LCC", &["Line 4B", "Line 5"]),
    ("S308UMP", &["Line 3A", "Line 5"]),
    ("S361TL", &["Line 3B", "Line 4"]),
    ("S213TD", &["Line 2", "Line 3B"]),
    ("S310CH", &["Line 3A", "Line 3B"]),
    ("S417NVL", &["Line 4", "MR2"]),
    ("S509BH", &["Line 5", "MR2"]),
    ("S406GV", &["Line 4", "MR3"]),
    ("S304PL", &["Line 3A", "Line 6"]),
    ("S206BQ", &["Line 2", "Line 6"]),
    ("S217TN", &["Line 2", "MR2"]),
];

/// Line 1 stops served by express trains.
const LINE_1_EXPRESS: &[&str] = &["S114BT", "S112BS", "S109TD", "S102STAP", "S104TD"];

/// Downtown stations kept open late on Friday and Saturday nights.
const NIGHT_STATIONS: &[&str] = &["S114BT", "S113OH", "S112BS", "S214HN"];

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|code| code.to_string()).collect()
}

fn weekend_night() -> WeekendNight<String> {
    WeekendNight {
        days: vec![Weekday::Fri, Weekday::Sat],
        close: ClockTime::at(0, 30),
        headway: 20,
        stations: codes(NIGHT_STATIONS),
    }
}

fn late_service() -> LateService {
    LateService {
        window: TimeWindow::new(ClockTime::at(21, 0), ClockTime::at(22, 0)),
        headway: 20,
    }
}

fn schedule_for(line: &str) -> LineSchedule<String> {
    let mut schedule = LineSchedule {
        late: Some(late_service()),
        ..LineSchedule::default()
    };
    match line {
        "Line 1" => {
            schedule.express = Some(ExpressService {
                stations: codes(LINE_1_EXPRESS),
                headway: 10,
            });
            schedule.early_morning = Some(EarlyMorning {
                window: TimeWindow::new(ClockTime::at(6, 0), ClockTime::at(6, 30)),
                headway: 6,
                stations: Vec::new(),
            });
            schedule.weekend_night = Some(weekend_night());
        }
        "Line 2" => {
            schedule.weekend_night = Some(weekend_night());
        }
        _ => {}
    }
    schedule
}

/// The reference network as data-source records.
pub fn reference_file() -> NetworkFile {
    let stations = STATIONS
        .iter()
        .map(|(code, name)| StationRecord::new(*code, *name))
        .collect();

    let lines = LINES
        .iter()
        .map(|(code, _)| LineRecord::new(*code, *code).with_schedule(schedule_for(code)))
        .collect();

    let segments = LINES
        .iter()
        .flat_map(|(line, stops)| {
            stops
                .windows(2)
                .map(move |pair| SegmentRecord::new(pair[0], pair[1], *line, TRAVEL_MINUTES))
        })
        .collect();

    let mut transfers = Vec::new();
    for (station, lines) in INTERCHANGES {
        for (i, from) in lines.iter().enumerate() {
            for to in &lines[i + 1..] {
                transfers.push(TransferRecord::new(
                    *station,
                    *from,
                    *to,
                    TRANSFER_PEAK_MINUTES,
                    TRANSFER_OFF_PEAK_MINUTES,
                ));
            }
        }
    }

    NetworkFile {
        stations,
        lines,
        segments,
        transfers,
        holidays: Vec::new(),
    }
}
