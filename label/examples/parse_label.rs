use label::{Dpi, LabelCodec};

fn main() -> Result<(), label::CodecError> {
    env_logger::init();

    let zpl = "^XA\n\
               ^FO40,40^A0N,30,30^FDHello World^FS\n\
               ^FO40,100^BY2,2,80^BCN,80,N,N,N^FD0123456789^FS\n\
               ^FO300,40^BQN,2,4^FDMA,HELLO^FS\n\
               ^XZ";
    let codec = LabelCodec::new()?;
    for element in codec.parse(zpl, Dpi::Dpi203) {
        println!("{} at {:?} mm", element.kind(), element.origin_mm());
    }
    Ok(())
}
