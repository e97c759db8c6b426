//! The bundled Cairo dataset as embedded CSV tables.

use std::io::Cursor;

use tp_data::{
    load_emergency_roads_reader, load_nodes_reader, load_potential_roads_reader, load_roads_reader,
    load_traffic_reader, load_transit_routes_reader, DataResult, Dataset, EmergencyNetwork,
};

// ── Road network ──────────────────────────────────────────────────────────────

// 15 neighborhoods and 10 facilities; x is longitude, y latitude.
const NODES_CSV: &str = "\
id,name,kind,class,x,y,population\n\
1,Maadi,settlement,Residential,31.25,29.96,250000\n\
2,Nasr City,settlement,Mixed,31.34,30.06,500000\n\
3,Downtown Cairo,settlement,Business,31.24,30.04,100000\n\
4,New Cairo,settlement,Residential,31.47,30.03,300000\n\
5,Heliopolis,settlement,Mixed,31.32,30.09,200000\n\
6,Zamalek,settlement,Residential,31.22,30.06,50000\n\
7,6th October City,settlement,Mixed,30.98,29.93,400000\n\
8,Giza,settlement,Mixed,31.21,29.99,550000\n\
9,Mohandessin,settlement,Business,31.2,30.05,180000\n\
10,Dokki,settlement,Mixed,31.21,30.03,220000\n\
11,Shubra,settlement,Residential,31.24,30.11,450000\n\
12,Helwan,settlement,Industrial,31.33,29.85,350000\n\
13,New Administrative Capital,settlement,Government,31.8,30.02,50000\n\
14,Al Rehab,settlement,Residential,31.49,30.06,120000\n\
15,Sheikh Zayed,settlement,Residential,30.94,30.01,150000\n\
F1,Cairo International Airport,facility,Airport,31.41,30.11,\n\
F2,Ramses Railway Station,facility,Transit Hub,31.25,30.06,\n\
F3,Cairo University,facility,Education,31.21,30.03,\n\
F4,Al-Azhar University,facility,Education,31.26,30.05,\n\
F5,Egyptian Museum,facility,Tourism,31.23,30.05,\n\
F6,Cairo International Stadium,facility,Sports,31.3,30.07,\n\
F7,Smart Village,facility,Business,30.97,30.07,\n\
F8,Cairo Festival City,facility,Commercial,31.4,30.03,\n\
F9,Qasr El Aini Hospital,facility,Medical,31.23,30.03,\n\
F10,Maadi Military Hospital,facility,Medical,31.25,29.95,\n\
";

const ROADS_CSV: &str = "\
from,to,distance,capacity,condition\n\
1,3,8.5,3000,7\n\
1,8,6.2,2500,6\n\
2,3,5.9,2800,8\n\
2,5,4.0,3200,9\n\
3,5,6.1,3500,7\n\
3,6,3.2,2000,8\n\
3,9,4.5,2600,6\n\
3,10,3.8,2400,7\n\
4,2,15.2,3800,9\n\
4,14,5.3,3000,10\n\
5,11,7.9,3100,7\n\
6,9,2.2,1800,8\n\
7,8,24.5,3500,8\n\
7,15,9.8,3000,9\n\
8,10,3.3,2200,7\n\
8,12,14.8,2600,5\n\
9,10,2.1,1900,7\n\
10,11,8.7,2400,6\n\
11,F2,3.6,2200,7\n\
12,1,12.7,2800,6\n\
13,4,45.0,4000,10\n\
14,13,35.5,3800,9\n\
15,7,9.8,3000,9\n\
F1,5,7.5,3500,9\n\
F1,2,9.2,3200,8\n\
F2,3,2.5,2000,7\n\
F7,15,8.3,2800,8\n\
F8,4,6.1,3000,9\n\
";

// Construction cost in million EGP.
const POTENTIAL_ROADS_CSV: &str = "\
from,to,distance,capacity,cost\n\
1,4,22.8,4000,450\n\
1,14,25.3,3800,500\n\
2,13,48.2,4500,950\n\
3,13,56.7,4500,1100\n\
5,4,16.8,3500,320\n\
6,8,7.5,2500,150\n\
7,13,82.3,4000,1600\n\
9,11,6.9,2800,140\n\
10,F7,27.4,3200,550\n\
11,13,62.1,4200,1250\n\
12,14,30.5,3600,610\n\
14,5,18.2,3300,360\n\
15,9,22.7,3000,450\n\
F1,13,40.2,4000,800\n\
F7,9,26.8,3200,540\n\
";

// Vehicles per hour, keyed "{from name}-{to name}".
const TRAFFIC_CSV: &str = "\
road,morning,afternoon,evening,night\n\
Maadi-Downtown Cairo,2800,1500,2600,800\n\
Maadi-Giza,2200,1200,2100,600\n\
Nasr City-Downtown Cairo,2700,1400,2500,700\n\
Nasr City-Heliopolis,3000,1600,2800,650\n\
Downtown Cairo-Heliopolis,3200,1700,3100,800\n\
Downtown Cairo-Zamalek,1800,1400,1900,500\n\
Downtown Cairo-Mohandessin,2400,1300,2200,550\n\
Downtown Cairo-Dokki,2300,1200,2100,500\n\
New Cairo-Nasr City,3600,1800,3300,750\n\
New Cairo-Al Rehab,2800,1600,2600,600\n\
Heliopolis-Shubra,2900,1500,2700,650\n\
Zamalek-Mohandessin,1700,1300,1800,450\n\
6th October City-Giza,3200,1700,3000,700\n\
6th October City-Sheikh Zayed,2800,1500,2600,600\n\
Giza-Dokki,2000,1100,1900,450\n\
Giza-Helwan,2400,1300,2200,500\n\
Mohandessin-Dokki,1800,1200,1700,400\n\
Dokki-Shubra,2200,1300,2100,500\n\
Shubra-Ramses Railway Station,2100,1200,2000,450\n\
Helwan-Maadi,2600,1400,2400,550\n\
New Administrative Capital-New Cairo,3800,2000,3500,800\n\
Al Rehab-New Administrative Capital,3600,1900,3300,750\n\
Sheikh Zayed-6th October City,2800,1500,2600,600\n\
Cairo International Airport-Heliopolis,3300,2200,3100,1200\n\
Cairo International Airport-Nasr City,3000,2000,2800,1100\n\
Ramses Railway Station-Downtown Cairo,1900,1600,1800,900\n\
Smart Village-Sheikh Zayed,2600,1500,2400,550\n\
Cairo Festival City-New Cairo,2800,1600,2600,600\n\
Qasr El Aini Hospital-Downtown Cairo,1500,1000,1400,400\n\
Maadi Military Hospital-Maadi,1200,800,1100,300\n\
";

const TRANSIT_ROUTES_CSV: &str = "\
route_id,mode,stops,frequency,capacity\n\
1,Metro,Maadi;Downtown Cairo;Zamalek,10,500\n\
2,Bus,Nasr City;Heliopolis;New Cairo,15,50\n\
3,Metro,Giza;Dokki;Downtown Cairo,12,400\n\
4,Bus,6th October City;Sheikh Zayed;Giza,20,60\n\
";

// ── Emergency network ─────────────────────────────────────────────────────────

// Separate grid-coordinate node set for dispatch.
const EMERGENCY_NODES_CSV: &str = "\
id,name,kind,class,x,y,population\n\
E1,Downtown Cairo,settlement,,0,0,\n\
E2,Zamalek,settlement,,2,2,\n\
E3,Maadi,settlement,,0,-5,\n\
E4,Heliopolis,settlement,,5,2,\n\
E5,Nasr City,settlement,,7,2,\n\
E6,6th of October,settlement,,-8,0,\n\
E7,New Cairo,settlement,,10,0,\n\
E8,Mohandessin,settlement,,-3,2,\n\
E9,Shubra,settlement,,0,5,\n\
E10,Dokki,settlement,,-3,1,\n\
E11,Giza,settlement,,-5,-2,\n\
E12,October City,settlement,,-9,-1,\n\
E13,Garden City,settlement,,1,-1,\n\
E14,Agouza,settlement,,-2,3,\n\
F1,El Salam Hospital,facility,Medical,6,3,\n\
F2,Maadi Fire Station,facility,Fire,1,-4,\n\
F3,Nasr City Police Station,facility,Police,8,3,\n\
F4,Giza Central Hospital,facility,Medical,-4,-3,\n\
F5,October Fire Station,facility,Fire,-7,-1,\n\
F6,6th October Hospital,facility,Medical,-7,1,\n\
F7,New Cairo Fire Station,facility,Fire,9,1,\n\
F8,Mohandessin Police Station,facility,Police,-2,2,\n\
F9,Shubra Hospital,facility,Medical,1,6,\n\
F10,Garden City Hospital,facility,Medical,2,-1,\n\
";

const EMERGENCY_ROADS_CSV: &str = "\
from,to,distance,capacity,traffic,grade\n\
E1,E2,2,50,10,good\n\
E2,E3,3,40,20,average\n\
E3,F1,5,20,30,poor\n\
E4,E5,4,60,15,good\n\
E5,E7,7,30,25,average\n\
E6,E4,10,40,35,poor\n\
E2,F2,3,40,5,good\n\
E5,F3,3,50,10,good\n\
E7,E6,12,25,40,poor\n\
E8,E9,7,45,25,average\n\
E4,E10,8,35,30,good\n\
E10,E11,6,50,20,good\n\
E11,F4,5,30,40,poor\n\
E3,F5,4,40,20,average\n\
E5,F1,4,55,12,good\n\
E6,F6,9,25,30,average\n\
E7,F7,5,40,20,good\n\
E8,F8,6,35,15,good\n\
E9,F9,8,45,25,average\n\
E11,F7,5,40,30,poor\n\
";

/// Parse every embedded table.
pub fn cairo() -> DataResult<Dataset> {
    Ok(Dataset {
        nodes:     load_nodes_reader(Cursor::new(NODES_CSV))?,
        roads:     load_roads_reader(Cursor::new(ROADS_CSV))?,
        potential: load_potential_roads_reader(Cursor::new(POTENTIAL_ROADS_CSV))?,
        traffic:   load_traffic_reader(Cursor::new(TRAFFIC_CSV))?,
        transit:   load_transit_routes_reader(Cursor::new(TRANSIT_ROUTES_CSV))?,
        emergency: Some(EmergencyNetwork {
            nodes: load_nodes_reader(Cursor::new(EMERGENCY_NODES_CSV))?,
            roads: load_emergency_roads_reader(Cursor::new(EMERGENCY_ROADS_CSV))?,
        }),
    })
}
