use super::{ComponentRow, analysis, components, hint, spec_lines, strings};
use crate::model::{Difficulty, ImageRef, ImageRefError, ModuleDraft, ModuleId};

const COMPONENTS: &[ComponentRow] = &[
    (
        "AerodynamicBlades",
        "Aerodynamic Blades",
        "Captures kinetic energy from wind through lift and drag forces",
        "Length: 40-60m, Material: Fiberglass/Carbon, Airfoil: NACA profiles",
        "Converts wind kinetic energy to mechanical rotation with optimal Cp",
        "images/components/turbine_blades.png",
    ),
    (
        "HubPitchSystem",
        "Hub & Pitch System",
        "Connects blades and controls blade angle for optimization",
        "Pitch Range: 0-90°, Response: <1s, Control: Servo/Hydraulic",
        "Optimizes angle of attack for maximum energy capture",
        "images/components/hub_pitch.png",
    ),
    (
        "MainShaft",
        "Main Shaft",
        "Low-speed shaft transmitting rotor torque to gearbox",
        "Speed: 15-50 rpm, Torque: 1-5 MNm, Material: Steel alloy",
        "Transfers mechanical power from rotor to drivetrain",
        "images/components/main_shaft.png",
    ),
    (
        "Gearbox",
        "Gearbox",
        "Speed multiplication system for generator matching",
        "Ratio: 1:50-100, Type: Planetary, Efficiency: >95%",
        "Converts low-speed high-torque to high-speed low-torque",
        "images/components/gearbox.png",
    ),
    (
        "DFIGGenerator",
        "DFIG Generator",
        "Doubly Fed Induction Generator for variable speed operation",
        "Power: 1.5-3MW, Speed: 1000-1800rpm, Slip: ±30%",
        "Converts mechanical energy to electrical with variable speed control",
        "images/components/dfig_generator.png",
    ),
    (
        "PowerElectronics",
        "Power Electronics",
        "Rotor-side and grid-side converters for DFIG control",
        "Converter Power: 25-30%, Switching: IGBT 2-5kHz, Control: Vector",
        "Enables variable speed operation and grid synchronization",
        "images/components/power_electronics.png",
    ),
    (
        "ControlSystem",
        "Control System",
        "Supervisory control for optimal power extraction and protection",
        "CPU: Industrial PC, I/O: 100+ points, Communication: Ethernet",
        "Coordinates pitch, yaw, and generator control for optimal performance",
        "images/components/control_system.png",
    ),
    (
        "Transformer",
        "Transformer",
        "Steps up generator voltage for transmission",
        "Ratio: 690V/22kV, Power: 2-3MVA, Type: Oil-filled",
        "Voltage transformation for efficient power transmission",
        "images/components/transformer.png",
    ),
];

// Wind happens to declare its components in flow order already.
const REFERENCE_ORDER: &[&str] = &[
    "Aerodynamic Blades",
    "Hub & Pitch System",
    "Main Shaft",
    "Gearbox",
    "DFIG Generator",
    "Power Electronics",
    "Control System",
    "Transformer",
];

const EXPLANATION: &[&str] = &[
    "Capture wind kinetic energy through aerodynamics",
    "Optimizes blade angle for maximum energy capture",
    "Transfers low-speed, high-torque mechanical power",
    "Speed multiplication for generator compatibility",
    "Mechanical to electrical energy conversion",
    "Variable speed control and grid synchronization",
    "Coordinates all subsystems for optimal operation",
    "Voltage step-up for efficient transmission",
];

const SYSTEM_SPECS: &[(&str, &str)] = &[
    ("Power Rating", "1.5-3 MW"),
    ("Rotor Diameter", "80-120m"),
    ("Hub Height", "80-150m"),
    ("Generator", "DFIG/PMSG"),
    ("Cut-in Speed", "3 m/s"),
    ("Rated Speed", "12 m/s"),
    ("Cut-out Speed", "25 m/s"),
];

const PERFORMANCE: &str = "\
### Power Output Calculation
**Available Wind Power:** P = ½ρAV³
**Turbine Power Output:** P = ½ρAV³Cp
**Power Coefficient:** Cp = f(λ, β) where λ = tip speed ratio
**Optimal λ:** λopt = ΩR/V ≈ 7-8 for most turbines

### DFIG Control Strategy
**Rotor Side Converter:** Controls rotor current for speed/power
**Grid Side Converter:** Maintains DC link voltage, reactive power
**Slip Power:** Ps = sP where s = slip, P = stator power
**Speed Range:** n = (1±s)ns for ±30% slip range
";

const ELECTRICAL: &str = "\
### DFIG Equivalent Circuit
**Stator:** Direct grid connection at synchronous frequency
**Rotor:** Fed through slip rings via power electronics
**Slip Calculation:** s = (ns - nr)/ns
**Power Flow:** Mechanical → Stator (75%) + Rotor (25%) → Grid

### Control Algorithms
**Vector Control:** Decoupled control of torque and flux
**MPPT:** Maximum power point tracking Popt = ½ρAV³Cpmax
**Pitch Control:** β adjustment for power regulation above rated
**Grid Code Compliance:** LVRT, frequency response, reactive support
";

pub(super) fn draft() -> Result<ModuleDraft, ImageRefError> {
    Ok(ModuleDraft {
        id: ModuleId::Wind,
        title: "Wind Energy System".into(),
        icon: "🌪️".into(),
        difficulty: Difficulty::Advanced,
        task: "Select components in the order of energy conversion from wind to electrical grid"
            .into(),
        system_specs: spec_lines(SYSTEM_SPECS),
        overview_image: ImageRef::new("images/wind_system.png")?,
        components: components(COMPONENTS)?,
        reference_order: strings(REFERENCE_ORDER),
        explanation: strings(EXPLANATION),
        hint: hint(
            &[
                ("Wind Capture Stage", "How is wind energy captured?"),
                ("Mechanical Stage", "How is rotational speed/torque converted?"),
                ("Electrical Stage", "How is mechanical energy converted to electricity?"),
                ("Grid Interface", "How is power conditioned for the grid?"),
            ],
            "Wind → Rotation → Speed Change → Generation → Control → Grid",
            &[
                "Start with wind capture (aerodynamics)",
                "Then mechanical transmission (speed conversion)",
                "Finally electrical conversion (generation & conditioning)",
            ],
            "Follow the energy flow from kinetic wind energy to AC grid power!",
        ),
        analysis: analysis(&[
            ("Wind Turbine Performance", PERFORMANCE),
            ("Electrical System Analysis", ELECTRICAL),
        ]),
    })
}
