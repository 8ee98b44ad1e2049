use super::{ComponentRow, analysis, components, hint, spec_lines, strings};
use crate::model::{Difficulty, ImageRef, ImageRefError, ModuleDraft, ModuleId};

const COMPONENTS: &[ComponentRow] = &[
    (
        "DamReservoir",
        "Dam & Reservoir",
        "Water retention structure creating hydraulic head pressure",
        "Height: 50-200m, Volume: 10⁶-10⁹ m³, Material: Concrete/Earth",
        "Converts flowing water kinetic energy to potential energy storage",
        "images/components/dam_reservoir.png",
    ),
    (
        "IntakeStructure",
        "Intake Structure",
        "Controlled water entry with debris screening and flow regulation",
        "Gate Type: Radial/Vertical, Flow Control: Servo actuators, Capacity: 500-2000 m³/s",
        "Regulates water flow into penstock with debris protection",
        "images/components/intake.png",
    ),
    (
        "Penstock",
        "Penstock",
        "Large pressure pipeline delivering water to turbine",
        "Diameter: 3-8m, Pressure: 5-20 bar, Material: Steel/Concrete",
        "Maintains hydraulic pressure and directs flow to turbine",
        "images/components/penstock.png",
    ),
    (
        "HydraulicTurbine",
        "Hydraulic Turbine",
        "Converts hydraulic energy to mechanical rotation",
        "Type: Francis/Kaplan, Efficiency: 85-95%, Speed: 100-750 rpm",
        "Extracts kinetic and pressure energy from water flow",
        "images/components/hydraulic_turbine.png",
    ),
    (
        "SynchronousGenerator",
        "Synchronous Generator",
        "Large AC generator for electrical power production",
        "Power: 1-700MW, Voltage: 11-22kV, Frequency: 50/60Hz, Poles: 20-60",
        "Converts mechanical rotation to three-phase electrical power",
        "images/components/sync_generator.png",
    ),
    (
        "GovernorSystem",
        "Governor System",
        "Hydraulic control system for turbine speed and power regulation",
        "Type: Digital/Hydraulic, Response: <5s, Accuracy: ±0.1%, Control: PID",
        "Maintains frequency and controls power output via wicket gate positioning",
        "images/components/governor.png",
    ),
    (
        "ExcitationSystem",
        "Excitation System",
        "Generator field control for voltage and reactive power regulation",
        "Type: Static/Brushless, Response: <0.1s, Voltage Reg: ±0.5%, Range: 0-130%",
        "Controls generator field current for voltage regulation and grid stability",
        "images/components/excitation.png",
    ),
    (
        "StepUpTransformer",
        "Step-up Transformer",
        "Voltage transformation for efficient power transmission",
        "Ratio: 11kV/220kV, Power: 100-800MVA, Type: Oil-immersed, Efficiency: >99%",
        "Steps up generator voltage for high-voltage transmission",
        "images/components/step_up_transformer.png",
    ),
    (
        "ProtectionControl",
        "Protection & Control",
        "Comprehensive protection and SCADA control systems",
        "Relays: Digital multifunction, Communication: IEC 61850, HMI: SCADA",
        "Protects equipment and provides remote monitoring/control capabilities",
        "images/components/protection_control.png",
    ),
];

const REFERENCE_ORDER: &[&str] = &[
    "Dam & Reservoir",
    "Intake Structure",
    "Penstock",
    "Hydraulic Turbine",
    "Synchronous Generator",
    "Governor System",
    "Excitation System",
    "Step-up Transformer",
    "Protection & Control",
];

const EXPLANATION: &[&str] = &[
    "Creates potential energy through water elevation",
    "Controls water entry with flow regulation",
    "Maintains pressure and directs flow to turbine",
    "Converts hydraulic energy to mechanical rotation",
    "Converts mechanical to electrical energy",
    "Controls speed and power through flow regulation",
    "Regulates voltage and reactive power",
    "Voltage transformation for transmission",
    "System protection and remote operation",
];

const SYSTEM_SPECS: &[(&str, &str)] = &[
    ("Power Rating", "1-700 MW"),
    ("Head Height", "50-200m"),
    ("Flow Rate", "100-1000 m³/s"),
    ("Turbine Type", "Francis/Kaplan/Pelton"),
    ("Generator", "Synchronous"),
    ("Efficiency", "80-95%"),
    ("Grid Voltage", "11-22 kV"),
];

const POWER: &str = "\
### Power Output Calculation
**Theoretical Power:** P = ρgQH (where ρ=1000kg/m³, g=9.81m/s², Q=flow, H=head)
**Actual Power:** P = ρgQHηt ηg (ηt=turbine efficiency, ηg=generator efficiency)
**Turbine Efficiency:** Francis: 85-95%, Kaplan: 90-95%, Pelton: 85-92%
**Overall Efficiency:** Typically 80-90% for complete system

### Governor Control System
**Speed Regulation:** Δn/n = -1/R × ΔP/Prated (R = regulation constant)
**Wicket Gate Control:** Position controls flow area and turbine power
**Response Time:** Mechanical: 5-20s, Electrical: 0.1-1s
**Stability:** Requires proper tuning of PID parameters
";

const ELECTRICAL: &str = "\
### Synchronous Generator Analysis
**EMF Equation:** E = 4.44fΦZKw (f=frequency, Φ=flux, Z=turns, Kw=winding factor)
**Power Equation:** P = (EV/Xs)sinδ (δ=load angle, Xs=synchronous reactance)
**Voltage Regulation:** VR = (Enl - Vfl)/Vfl × 100%
**Power Factor Control:** Via field excitation adjustment

### Protection Systems
**Generator Protection:** Differential, over/under voltage, frequency
**Transformer Protection:** Differential, gas relay, temperature
**System Protection:** Distance relays, directional overcurrent
**Backup Protection:** Independent systems for critical components
";

pub(super) fn draft() -> Result<ModuleDraft, ImageRefError> {
    Ok(ModuleDraft {
        id: ModuleId::Hydro,
        title: "Hydroelectric System".into(),
        icon: "💧".into(),
        difficulty: Difficulty::Expert,
        task: "Select components following the complete water flow and energy conversion path"
            .into(),
        system_specs: spec_lines(SYSTEM_SPECS),
        overview_image: ImageRef::new("images/hydro_system.png")?,
        components: components(COMPONENTS)?,
        reference_order: strings(REFERENCE_ORDER),
        explanation: strings(EXPLANATION),
        hint: hint(
            &[
                ("Water Storage", "Where is potential energy stored?"),
                ("Flow Control", "How is water flow regulated?"),
                ("Energy Conversion", "How is hydraulic energy converted?"),
                ("Electrical Systems", "How is power generated and controlled?"),
                ("Grid Interface", "How is power transmitted?"),
            ],
            "Storage → Control → Conversion → Generation → Transmission",
            &[
                "Start with water storage (potential energy)",
                "Then water flow control (kinetic energy)",
                "Then mechanical conversion (turbine)",
                "Finally electrical generation & control (generator systems)",
            ],
            "Follow water flow from storage to electrical grid!",
        ),
        analysis: analysis(&[
            ("Hydroelectric Power Analysis", POWER),
            ("Electrical System Design", ELECTRICAL),
        ]),
    })
}
